//! Error types for the Claim.MD client.
//!
//! # Design
//! Callers need to tell three failure classes apart: the input was rejected
//! before anything touched the network (`Validation`), the round-trip itself
//! failed or came back non-2xx (`Transport`), or the server answered with a
//! body that is not a JSON object (`Decode`). Each class has its own enum so a
//! `match` on `ApiError` stays shallow, and every validation failure names the
//! field it is about.

use thiserror::Error;

/// Top-level error returned by every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input violated a documented field rule. No request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport failed or the server returned a non-2xx status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into a JSON object.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A field-level input rule was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A mapping passed to `from_fields` lacks a mandatory wire key.
    #[error("missing required field: {key}")]
    MissingField { key: String },

    /// A field is present but its value is malformed.
    #[error("{field} {reason}")]
    Invalid { field: String, reason: String },

    /// A file-upload argument was not a stream.
    #[error("{field} must be a readable stream")]
    NotAStream { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::Required { field: field.into() }
    }

    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field (or wire key for `MissingField`).
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field } | Self::Invalid { field, .. } | Self::NotAStream { field } => field,
            Self::MissingField { key } => key,
        }
    }
}

/// Failures of the HTTP round-trip.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The underlying HTTP client failed (connect, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stream-valued field could not be read while encoding the body.
    #[error("failed to read request body: {0}")]
    Body(#[from] std::io::Error),
}

/// The response body was not a JSON object.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response body is JSON but not an object")]
    NotAnObject,
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("base URL must be absolute: {0}")]
    RelativeBaseUrl(String),

    #[error("invalid {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}
