use super::present_fields;
use crate::client::{ClaimMdClient, ResponseMap};
use crate::dto::{ClaimAppeal, Payload};
use crate::error::ApiError;
use crate::form::FieldMap;
use crate::transport::Transport;

const ARCHIVE_ENDPOINT: &str = "/services/archive/";
const MODIFY_ENDPOINT: &str = "/services/modify/";
const APPEAL_ENDPOINT: &str = "/services/appeal/";
const NOTES_ENDPOINT: &str = "/services/notes/";

/// Archiving, modification history, appeals and notes for submitted claims.
pub struct ClaimRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> ClaimRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    pub fn archive(&self, claim_id: &str) -> Result<ResponseMap, ApiError> {
        let fields: FieldMap = [("claimid".to_string(), claim_id.to_string())].into();
        self.client.post_form(ARCHIVE_ENDPOINT, fields)
    }

    /// Modifications Claim.MD applied to claims, optionally narrowed to one
    /// modification, one claim, or one field.
    pub fn list_modifications(
        &self,
        mod_id: Option<&str>,
        claimmd_id: Option<&str>,
        field: Option<&str>,
    ) -> Result<ResponseMap, ApiError> {
        let fields = present_fields(&[("ModID", mod_id), ("ClaimMD_ID", claimmd_id), ("Field", field)]);
        self.client.post_form(MODIFY_ENDPOINT, fields)
    }

    pub fn appeal(&self, appeal: impl Into<Payload<ClaimAppeal>>) -> Result<ResponseMap, ApiError> {
        self.client.post_form(APPEAL_ENDPOINT, appeal.into().into_fields())
    }

    pub fn notes(&self, note_id: Option<&str>, claimmd_id: Option<&str>) -> Result<ResponseMap, ApiError> {
        let fields = present_fields(&[("ClaimMD_ID", claimmd_id), ("NoteID", note_id)]);
        self.client.post_form(NOTES_ENDPOINT, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{ClaimAppealInput, ToFields};
    use crate::requests::test_support::{form_fields, mock_client, path, single_request};

    #[test]
    fn archive_posts_claim_id() {
        let client = mock_client();
        client.transport().push_json(r#"{"result":"archived"}"#);
        let resp = client.claims().archive("CLM42").unwrap();
        assert_eq!(resp["result"], "archived");

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/archive/");
        assert_eq!(form_fields(&req), [("claimid".to_string(), "CLM42".to_string())].into());
    }

    #[test]
    fn list_modifications_omits_absent_filters() {
        let client = mock_client();
        client.transport().push_json("{}");
        client.claims().list_modifications(None, Some("99"), Some("payerid")).unwrap();

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/modify/");
        let fields = form_fields(&req);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["ClaimMD_ID"], "99");
        assert_eq!(fields["Field"], "payerid");
    }

    #[test]
    fn appeal_accepts_dto_or_raw_fields() {
        let client = mock_client();
        client.transport().push_json("{}");
        client.transport().push_json("{}");

        let dto = ClaimAppeal::new(ClaimAppealInput {
            claim_id: Some("CLM7".to_string()),
            contact_name: Some("Dana".to_string()),
            ..Default::default()
        })
        .unwrap();
        let raw = dto.to_fields();
        client.claims().appeal(dto).unwrap();
        client.claims().appeal(raw).unwrap();

        let requests = client.transport().requests();
        assert_eq!(path(&requests[0]), "/services/appeal/");
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[test]
    fn notes_sends_both_filters() {
        let client = mock_client();
        client.transport().push_json(r#"{"notes":[]}"#);
        client.claims().notes(Some("12"), Some("34")).unwrap();

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/notes/");
        let fields = form_fields(&req);
        assert_eq!(fields["NoteID"], "12");
        assert_eq!(fields["ClaimMD_ID"], "34");
    }
}
