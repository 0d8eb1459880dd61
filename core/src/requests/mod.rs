//! Resource request groups, one per Claim.MD resource family.
//!
//! Each group borrows the client, fixes its endpoint paths, and turns typed
//! arguments into wire fields. Every operation is a `POST`.

mod claims;
mod eligibility;
mod era;
mod files;
mod payers;
mod providers;
mod responses;

pub use claims::ClaimRequests;
pub use eligibility::EligibilityRequests;
pub use era::EraRequests;
pub use files::FileRequests;
pub use payers::PayerRequests;
pub use providers::ProviderRequests;
pub use responses::{ResponsePages, ResponseRequests};

use crate::error::ValidationError;
use crate::form::{FieldMap, FieldValue};

/// Collect the present values of `pairs` into a wire mapping.
fn present_fields(pairs: &[(&str, Option<&str>)]) -> FieldMap {
    pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| ((*key).to_string(), v.to_string())))
        .collect()
}

/// Accept `value` only if it is a file stream.
fn require_stream(field: &str, value: FieldValue) -> Result<FieldValue, ValidationError> {
    if value.is_stream() {
        return Ok(value);
    }
    Err(ValidationError::NotAStream {
        field: field.to_string(),
    })
}
