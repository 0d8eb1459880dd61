//! The Claim.MD request adapter.
//!
//! # Design
//! `ClaimMdClient` holds read-only state: the configuration, the account
//! key, and a transport. Every call goes through the same three steps:
//! - `build_request` injects `AccountKey`, encodes the body, and sets headers;
//! - the transport performs the round-trip;
//! - `parse_response` maps non-2xx statuses to errors and decodes the JSON
//!   object.
//!
//! The first and last steps are public and pure, so a caller that wants to
//! run the I/O itself can do so. Resource groups (`claims()`, `era()`, ...)
//! are thin views that borrow the client and fix the endpoint path.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, DecodeError, TransportError, ValidationError};
use crate::form::{self, BodyEncoding, FieldMap, FieldValue, Fields};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::requests::{
    ClaimRequests, EligibilityRequests, EraRequests, FileRequests, PayerRequests, ProviderRequests,
    ResponseRequests,
};
use crate::transport::{Transport, UreqTransport};

/// Decoded JSON object returned by every Claim.MD endpoint.
pub type ResponseMap = serde_json::Map<String, Value>;

/// Field carrying the account credential on every request.
pub const ACCOUNT_KEY_FIELD: &str = "AccountKey";

/// Synchronous client for the Claim.MD API.
///
/// Holds no mutable state, so one instance can be shared across threads when
/// its transport allows it.
pub struct ClaimMdClient<T = UreqTransport> {
    account_key: SecretString,
    config: Config,
    transport: T,
}

impl ClaimMdClient<UreqTransport> {
    /// Client backed by a `ureq` agent using the configured timeout.
    pub fn new(account_key: impl Into<String>, config: Config) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(account_key, config, transport)
    }
}

impl<T: Transport> ClaimMdClient<T> {
    pub fn with_transport(account_key: impl Into<String>, config: Config, transport: T) -> Self {
        Self {
            account_key: SecretString::from(account_key.into()),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `fields` to `path` and decode the JSON object that comes back.
    ///
    /// `AccountKey` is added to `fields`, replacing any value the caller put
    /// there. `extra_headers` are applied last and replace same-named
    /// headers.
    pub fn send_request(
        &self,
        method: HttpMethod,
        path: &str,
        fields: Fields,
        encoding: BodyEncoding,
        extra_headers: &[(&str, &str)],
    ) -> Result<ResponseMap, ApiError> {
        let field_count = fields.len();
        let request = self.build_request(method, path, fields, encoding, extra_headers)?;
        debug!(
            method = %request.method,
            url = %request.url,
            ?encoding,
            fields = field_count,
            body_bytes = request.body.len(),
            "sending Claim.MD request"
        );
        let response = self.transport.perform(request)?;
        debug!(
            status = response.status,
            body_bytes = response.body.len(),
            "received Claim.MD response"
        );
        self.parse_response(response)
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        mut fields: Fields,
        encoding: BodyEncoding,
        extra_headers: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let url = self
            .config
            .base_url()
            .join(path)
            .map_err(|e| ValidationError::invalid("path", e.to_string()))?;

        fields.insert(
            ACCOUNT_KEY_FIELD.to_string(),
            FieldValue::Text(self.account_key.expose_secret().to_string()),
        );
        let body = form::encode(fields, encoding)?;

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), body.content_type),
        ];
        for (name, value) in extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push(((*name).to_string(), (*value).to_string()));
        }

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body: body.bytes,
        })
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<ResponseMap, ApiError> {
        check_status(&response)?;
        let value: Value = serde_json::from_slice(&response.body).map_err(DecodeError::InvalidJson)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DecodeError::NotAnObject.into()),
        }
    }

    /// `POST` text fields form-urlencoded.
    pub(crate) fn post_form(&self, path: &str, fields: FieldMap) -> Result<ResponseMap, ApiError> {
        self.send_request(HttpMethod::Post, path, form::text_fields(fields), BodyEncoding::Form, &[])
    }

    /// `POST` fields as multipart, for requests carrying a file.
    pub(crate) fn post_multipart(&self, path: &str, fields: Fields) -> Result<ResponseMap, ApiError> {
        self.send_request(HttpMethod::Post, path, fields, BodyEncoding::Multipart, &[])
    }

    pub fn claims(&self) -> ClaimRequests<'_, T> {
        ClaimRequests::new(self)
    }

    pub fn era(&self) -> EraRequests<'_, T> {
        EraRequests::new(self)
    }

    pub fn eligibility(&self) -> EligibilityRequests<'_, T> {
        EligibilityRequests::new(self)
    }

    pub fn files(&self) -> FileRequests<'_, T> {
        FileRequests::new(self)
    }

    pub fn payers(&self) -> PayerRequests<'_, T> {
        PayerRequests::new(self)
    }

    pub fn providers(&self) -> ProviderRequests<'_, T> {
        ProviderRequests::new(self)
    }

    pub fn responses(&self) -> ResponseRequests<'_, T> {
        ResponseRequests::new(self)
    }
}

impl<T> fmt::Debug for ClaimMdClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimMdClient")
            .field("config", &self.config)
            .field("account_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Map non-2xx status codes to `TransportError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "Claim.MD returned an error status");
    Err(TransportError::Status {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}
