use super::present_fields;
use crate::client::{ClaimMdClient, ResponseMap};
use crate::error::ApiError;
use crate::transport::Transport;

const PAYER_LIST_ENDPOINT: &str = "/services/payerlist/";

pub struct PayerRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> PayerRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    /// Payer directory, optionally filtered by id or by name.
    pub fn list_payers(&self, payer_id: Option<&str>, payer_name: Option<&str>) -> Result<ResponseMap, ApiError> {
        let fields = present_fields(&[("payerid", payer_id), ("payer_name", payer_name)]);
        self.client.post_form(PAYER_LIST_ENDPOINT, fields)
    }
}
