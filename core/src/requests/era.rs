use super::present_fields;
use crate::client::{ClaimMdClient, ResponseMap};
use crate::dto::{EraQuery, Payload};
use crate::error::ApiError;
use crate::transport::Transport;

const LIST_ENDPOINT: &str = "/services/eralist/";
const X835_ENDPOINT: &str = "/services/era835/";
const PDF_ENDPOINT: &str = "/services/erapdf/";
const JSON_ENDPOINT: &str = "/services/eradata/";

/// Electronic remittance advice retrieval.
pub struct EraRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> EraRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    /// Remittance detail as structured JSON.
    pub fn get_json(&self, era_id: &str) -> Result<ResponseMap, ApiError> {
        self.client
            .post_form(JSON_ENDPOINT, present_fields(&[("eraid", Some(era_id))]))
    }

    /// Remittance rendered as PDF, optionally for one patient control number.
    /// The document comes back inside the JSON object.
    pub fn get_pdf(&self, era_id: &str, pcn: Option<&str>) -> Result<ResponseMap, ApiError> {
        self.client
            .post_form(PDF_ENDPOINT, present_fields(&[("eraid", Some(era_id)), ("pcn", pcn)]))
    }

    /// Raw X12 835 content.
    pub fn get_835(&self, era_id: &str) -> Result<ResponseMap, ApiError> {
        self.client
            .post_form(X835_ENDPOINT, present_fields(&[("eraid", Some(era_id))]))
    }

    /// List remittances matching `query`. `Payload::default()` lists all.
    pub fn get_list(&self, query: impl Into<Payload<EraQuery>>) -> Result<ResponseMap, ApiError> {
        self.client.post_form(LIST_ENDPOINT, query.into().into_fields())
    }
}
