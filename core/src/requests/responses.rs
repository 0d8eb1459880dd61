use std::iter::FusedIterator;

use serde_json::Value;
use tracing::debug;

use super::present_fields;
use crate::client::{ClaimMdClient, ResponseMap};
use crate::error::{ApiError, ValidationError};
use crate::transport::Transport;

const RESPONSE_ENDPOINT: &str = "/services/response/";

/// Cursor that requests the first page.
const FIRST_PAGE: &str = "0";

/// Key in each page naming the cursor of the next one.
const NEXT_CURSOR_KEY: &str = "last_responseid";

/// Claim status responses: acknowledgements, rejections, payer messages.
pub struct ResponseRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> ResponseRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    /// One page of responses newer than `response_id`. Pass `"0"` for the
    /// first page; an empty id is rejected.
    pub fn fetch_responses(&self, response_id: &str, claim_id: Option<&str>) -> Result<ResponseMap, ApiError> {
        if response_id.is_empty() {
            return Err(ValidationError::required("response_id").into());
        }
        let fields = present_fields(&[("ResponseID", Some(response_id)), ("ClaimID", claim_id)]);
        self.client.post_form(RESPONSE_ENDPOINT, fields)
    }

    /// Every page, fetched lazily from the first one.
    pub fn fetch_all_responses(&self, claim_id: Option<&str>) -> ResponsePages<'a, T> {
        ResponsePages {
            requests: ResponseRequests { client: self.client },
            claim_id: claim_id.map(str::to_string),
            cursor: Some(FIRST_PAGE.to_string()),
        }
    }
}

/// Iterator over response pages.
///
/// Each `next()` performs exactly one request. Iteration ends after a page
/// without a `last_responseid`, or right after an error is yielded.
pub struct ResponsePages<'a, T> {
    requests: ResponseRequests<'a, T>,
    claim_id: Option<String>,
    cursor: Option<String>,
}

impl<T> ResponsePages<'_, T> {
    /// Cursor the next `next()` call will send, if any.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

impl<T: Transport> Iterator for ResponsePages<'_, T> {
    type Item = Result<ResponseMap, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        debug!(%cursor, claim_id = ?self.claim_id, "fetching response page");
        let page = match self.requests.fetch_responses(&cursor, self.claim_id.as_deref()) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };
        self.cursor = next_cursor(&page);
        Some(Ok(page))
    }
}

impl<T: Transport> FusedIterator for ResponsePages<'_, T> {}

/// The server sends the cursor as a string or a bare number.
fn next_cursor(page: &ResponseMap) -> Option<String> {
    match page.get(NEXT_CURSOR_KEY)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
