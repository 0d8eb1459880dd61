use crate::client::{ClaimMdClient, ResponseMap};
use crate::dto::{Payload, ProviderEnrollment};
use crate::error::ApiError;
use crate::transport::Transport;

const ENROLL_ENDPOINT: &str = "/services/enroll/";

pub struct ProviderRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> ProviderRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    /// Enroll a provider with a payer for one transaction type.
    pub fn enroll(&self, enrollment: impl Into<Payload<ProviderEnrollment>>) -> Result<ResponseMap, ApiError> {
        self.client.post_form(ENROLL_ENDPOINT, enrollment.into().into_fields())
    }
}
