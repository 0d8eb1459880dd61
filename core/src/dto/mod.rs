//! Typed request models for the Claim.MD endpoints that take many fields.
//!
//! # Design
//! Each model comes in two halves. The `*Input` struct is plain data with
//! public fields and `Default`, so callers can fill in only what they need.
//! The validated wrapper (`ClaimAppeal`, `EraQuery`, `Eligibility`,
//! `ProviderEnrollment`) can only be obtained through a fallible `new` or
//! `from_fields`, so a value of that type has always passed every field rule.
//!
//! `to_fields` renders the Claim.MD wire names (`ins_name_l`, `PayerID`, ...)
//! and drops absent fields. Resource operations accept either a validated
//! model or a raw [`FieldMap`] through [`Payload`].

mod claim_appeal;
mod eligibility;
mod era;
mod provider_enrollment;
pub mod validate;

pub use claim_appeal::{ClaimAppeal, ClaimAppealInput};
pub use eligibility::{Eligibility, EligibilityInput};
pub use era::{EraQuery, EraQueryInput};
pub use provider_enrollment::{ProviderEnrollment, ProviderEnrollmentInput, ENROLL_TYPES};

use crate::error::ValidationError;
use crate::form::FieldMap;

/// Export to the flat Claim.MD wire mapping.
pub trait ToFields {
    fn to_fields(&self) -> FieldMap;
}

/// A request body given either as a validated model or as raw wire fields.
///
/// Raw fields are sent as-is, without validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<D> {
    Dto(D),
    Raw(FieldMap),
}

impl<D: ToFields> Payload<D> {
    pub fn into_fields(self) -> FieldMap {
        match self {
            Payload::Dto(dto) => dto.to_fields(),
            Payload::Raw(fields) => fields,
        }
    }
}

impl<D> Default for Payload<D> {
    fn default() -> Self {
        Payload::Raw(FieldMap::new())
    }
}

impl<D> From<FieldMap> for Payload<D> {
    fn from(fields: FieldMap) -> Self {
        Payload::Raw(fields)
    }
}

impl From<ClaimAppeal> for Payload<ClaimAppeal> {
    fn from(dto: ClaimAppeal) -> Self {
        Payload::Dto(dto)
    }
}

impl From<EraQuery> for Payload<EraQuery> {
    fn from(dto: EraQuery) -> Self {
        Payload::Dto(dto)
    }
}

impl From<Eligibility> for Payload<Eligibility> {
    fn from(dto: Eligibility) -> Self {
        Payload::Dto(dto)
    }
}

impl From<ProviderEnrollment> for Payload<ProviderEnrollment> {
    fn from(dto: ProviderEnrollment) -> Self {
        Payload::Dto(dto)
    }
}

/// Builds a wire mapping, skipping absent values.
#[derive(Default)]
pub(crate) struct FieldWriter(FieldMap);

impl FieldWriter {
    pub(crate) fn put(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub(crate) fn put_opt(mut self, key: &str, value: Option<&String>) -> Self {
        if let Some(v) = value {
            self.0.insert(key.to_string(), v.clone());
        }
        self
    }

    pub(crate) fn finish(self) -> FieldMap {
        self.0
    }
}

pub(crate) fn take_opt(fields: &FieldMap, key: &str) -> Option<String> {
    fields.get(key).cloned()
}

pub(crate) fn take_required(fields: &FieldMap, key: &str) -> Result<String, ValidationError> {
    fields
        .get(key)
        .cloned()
        .ok_or_else(|| ValidationError::missing_field(key))
}
