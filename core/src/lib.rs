//! Synchronous client for the Claim.MD medical claims clearinghouse API.
//!
//! # Overview
//! Every Claim.MD operation is a `POST` of form fields plus the account key,
//! answered with a JSON object. The crate splits that into:
//! - typed request models with field validation ([`dto`]);
//! - body encoding, urlencoded or multipart ([`form`]);
//! - the request adapter that builds requests and parses responses
//!   ([`client`]);
//! - a pluggable blocking [`Transport`] doing the actual round-trip.
//!
//! # Design
//! - `ClaimMdClient` only holds read-only state, so it is safe to share.
//! - Requests are built and parsed without touching the network; the
//!   transport is the only I/O boundary, and `MockTransport` replaces it in
//!   tests.
//! - Operations are grouped by resource (`client.claims()`, `client.era()`,
//!   ...) and return the decoded JSON object as a [`ResponseMap`].
//!
//! ```no_run
//! use claimmd_core::{ClaimMdClient, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClaimMdClient::new("my-account-key", Config::from_env()?);
//! for page in client.responses().fetch_all_responses(None) {
//!     println!("{:?}", page?.get("response"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod form;
pub mod http;
pub mod requests;
pub mod transport;

pub use client::{ClaimMdClient, ResponseMap, ACCOUNT_KEY_FIELD};
pub use config::Config;
pub use dto::{
    ClaimAppeal, ClaimAppealInput, Eligibility, EligibilityInput, EraQuery, EraQueryInput, Payload,
    ProviderEnrollment, ProviderEnrollmentInput, ToFields,
};
pub use error::{ApiError, ConfigError, DecodeError, TransportError, ValidationError};
pub use form::{BodyEncoding, FieldMap, FieldValue, Fields, FileStream};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use requests::{
    ClaimRequests, EligibilityRequests, EraRequests, FileRequests, PayerRequests, ProviderRequests, ResponsePages,
    ResponseRequests,
};
pub use transport::{MockTransport, Transport, UreqTransport};
