use super::{present_fields, require_stream};
use crate::client::{ClaimMdClient, ResponseMap};
use crate::dto::validate::is_yyyy_mm_dd;
use crate::error::{ApiError, ValidationError};
use crate::form::{FieldValue, Fields};
use crate::transport::Transport;

const UPLOAD_ENDPOINT: &str = "/services/upload";
const UPLOAD_LIST_ENDPOINT: &str = "/services/uploadlist";

/// Claim batch file uploads.
pub struct FileRequests<'a, T> {
    client: &'a ClaimMdClient<T>,
}

impl<'a, T: Transport> FileRequests<'a, T> {
    pub(crate) fn new(client: &'a ClaimMdClient<T>) -> Self {
        Self { client }
    }

    /// Upload a claim batch file. When given, `filename` is sent as a separate
    /// `Filename` field; the part's own filename comes from the stream.
    pub fn upload(&self, file: impl Into<FieldValue>, filename: Option<&str>) -> Result<ResponseMap, ApiError> {
        let file = require_stream("File", file.into())?;
        let mut fields = Fields::new();
        fields.insert("File".to_string(), file);
        if let Some(name) = filename {
            fields.insert("Filename".to_string(), FieldValue::from(name));
        }
        self.client.post_multipart(UPLOAD_ENDPOINT, fields)
    }

    /// Previously uploaded files. `upload_date` is `yyyy-mm-dd`, unlike the
    /// `mm-dd-yyyy` dates of the ERA list.
    pub fn get_upload_list(&self, page: Option<u32>, upload_date: Option<&str>) -> Result<ResponseMap, ApiError> {
        if let Some(date) = upload_date {
            if !is_yyyy_mm_dd(date) {
                return Err(ValidationError::invalid("upload_date", "must be in yyyy-mm-dd format").into());
            }
        }
        let page = page.map(|p| p.to_string());
        let fields = present_fields(&[("Page", page.as_deref()), ("UploadDate", upload_date)]);
        self.client.post_form(UPLOAD_LIST_ENDPOINT, fields)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::form::FileStream;
    use crate::requests::test_support::{form_fields, mock_client, path, single_request};

    #[test]
    fn upload_sends_file_and_filename() {
        let client = mock_client();
        client.transport().push_json(r#"{"fileid":"F-1"}"#);
        let file = FileStream::new(Cursor::new(b"ISA*00*837~".to_vec())).with_filename("batch.837");
        let resp = client.files().upload(file, Some("batch.837")).unwrap();
        assert_eq!(resp["fileid"], "F-1");

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/upload");
        let body = String::from_utf8(req.body).unwrap();
        assert!(body.contains("name=\"File\"; filename=\"batch.837\""));
        assert!(body.contains("ISA*00*837~"));
        assert!(body.contains("name=\"Filename\"\r\n\r\nbatch.837\r\n"));
        assert!(body.contains("name=\"AccountKey\"\r\n\r\nTESTKEY\r\n"));
    }

    #[test]
    fn upload_without_filename_omits_the_field() {
        let client = mock_client();
        client.transport().push_json("{}");
        client
            .files()
            .upload(FileStream::new(Cursor::new(Vec::new())), None)
            .unwrap();
        let body = String::from_utf8(single_request(&client).body).unwrap();
        assert!(!body.contains("name=\"Filename\""));
    }

    #[test]
    fn upload_rejects_plain_text() {
        let client = mock_client();
        let err = client.files().upload("ISA*00*837~", None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::NotAStream { .. })));
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn upload_list_sends_page_and_date() {
        let client = mock_client();
        client.transport().push_json(r#"{"file":[]}"#);
        client.files().get_upload_list(Some(2), Some("2024-03-01")).unwrap();

        let req = single_request(&client);
        assert_eq!(path(&req), "/services/uploadlist");
        let fields = form_fields(&req);
        assert_eq!(fields["Page"], "2");
        assert_eq!(fields["UploadDate"], "2024-03-01");
    }

    #[test]
    fn upload_list_without_filters_sends_nothing_else() {
        let client = mock_client();
        client.transport().push_json("{}");
        client.files().get_upload_list(None, None).unwrap();
        assert!(form_fields(&single_request(&client)).is_empty());
    }

    #[test]
    fn upload_list_date_uses_iso_order() {
        let client = mock_client();
        for bad in ["03-01-2024", "20240301", "2024-3-1"] {
            let err = client.files().get_upload_list(None, Some(bad)).unwrap_err();
            assert!(
                matches!(err, ApiError::Validation(ref e) if e.field() == "upload_date"),
                "{bad}"
            );
        }
        assert_eq!(client.transport().request_count(), 0);
    }
}
