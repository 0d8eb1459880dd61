//! Pluggable HTTP transports.
//!
//! # Design
//! The client never talks to the network directly. It builds an
//! [`HttpRequest`], hands it to a [`Transport`], and parses whatever
//! [`HttpResponse`] comes back. [`UreqTransport`] is the blocking production
//! implementation; [`MockTransport`] replays canned responses and records
//! what was sent so tests can assert on the exact wire body.
//!
//! Transports return non-2xx responses as data. Mapping a status to an error
//! is the client's job.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Upper bound on a response body read by [`UreqTransport`]. ERA PDFs come
/// back base64-encoded inside JSON and can be large.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// Executes one HTTP round-trip.
pub trait Transport {
    fn perform(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent keeps its connection pool across calls, so reuse one transport
/// (or one client) instead of building a new one per request.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn perform(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send(&request.body[..])
            }
        };
        let mut response = result.map_err(|e| TransportError::Request(Box::new(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_vec()
            .map_err(|e| TransportError::Request(Box::new(e)))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// In-memory transport that replays queued responses in order and records
/// every request it receives.
///
/// Once the queue is empty further calls fail with
/// [`TransportError::Request`].
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
    }

    /// Queue a `200 OK` with `body` as its JSON payload.
    pub fn push_json(&self, body: &str) {
        self.push_response(HttpResponse::json(body));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Transport for MockTransport {
    fn perform(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no canned response queued".into())))
    }
}
