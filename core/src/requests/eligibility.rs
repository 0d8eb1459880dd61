use super::require_stream;
use crate::client::{ClaimMdClient, ResponseMap};
use crate::dto::{Eligibility, Payload};
use crate::error::ApiError;
use crate::form::{FieldValue, Fields};
use crate::transport::Transport;

const JSON_ENDPOINT: &str = "/services/eligdata/";
const X12_ENDPOINT: &str = "/services/elig/";

/// Real-time insurance eligibility checks.
pub struct EligibilityRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> EligibilityRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    pub fn check_eligibility_json(&self, inquiry: impl Into<Payload<Eligibility>>) -> Result<ResponseMap, ApiError> {
        self.client.post_form(JSON_ENDPOINT, inquiry.into().into_fields())
    }

    /// Submit an X12 270 inquiry file and receive the 271 answer.
    ///
    /// `file` must be a stream; text is rejected before anything is sent.
    pub fn check_eligibility_270_271(&self, file: impl Into<FieldValue>) -> Result<ResponseMap, ApiError> {
        let file = require_stream("File", file.into())?;
        let fields: Fields = [("File".to_string(), file)].into_iter().collect();
        self.client.post_multipart(X12_ENDPOINT, fields)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::dto::{EligibilityInput, ToFields};
    use crate::error::ValidationError;
    use crate::form::FileStream;
    use crate::requests::test_support::{form_fields, mock_client, path, single_request};

    fn inquiry() -> Eligibility {
        Eligibility::new(EligibilityInput {
            ins_last_name: "Doe".to_string(),
            ins_first_name: "Jane".to_string(),
            payer_id: "60054".to_string(),
            patient_relationship: "18".to_string(),
            service_date: "20240115".to_string(),
            provider_npi: "1234567893".to_string(),
            provider_tax_id: "123456789".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn json_inquiry_posts_wire_fields() {
        let client = mock_client();
        client.transport().push_json(r#"{"elig":{"eligible":"Y"}}"#);
        let expected = inquiry().to_fields();
        let resp = client.eligibility().check_eligibility_json(inquiry()).unwrap();
        assert_eq!(resp["elig"]["eligible"], "Y");

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/eligdata/");
        assert_eq!(form_fields(&req), expected);
    }

    #[test]
    fn x12_inquiry_is_multipart() {
        let client = mock_client();
        client.transport().push_json(r#"{"data":"ISA*271~"}"#);
        let file = FileStream::new(Cursor::new(b"ISA*270~".to_vec())).with_filename("inquiry.270");
        client.eligibility().check_eligibility_270_271(file).unwrap();

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/elig/");
        assert!(req.header("Content-Type").unwrap().starts_with("multipart/form-data"));
        let body = String::from_utf8(req.body).unwrap();
        assert!(body.contains("name=\"File\"; filename=\"inquiry.270\""));
        assert!(body.contains("ISA*270~"));
    }

    #[test]
    fn x12_inquiry_rejects_text_without_sending() {
        let client = mock_client();
        let err = client
            .eligibility()
            .check_eligibility_270_271("ISA*270~")
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::NotAStream { ref field }) if field == "File"
        ));
        assert_eq!(client.transport().request_count(), 0);
    }
}
