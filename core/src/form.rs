//! Field values and body encoding for Claim.MD requests.
//!
//! Claim.MD takes flat `name=value` fields, either form-urlencoded or as
//! `multipart/form-data` when a file is attached. [`FieldMap`] is the
//! text-only mapping DTOs export; [`Fields`] is what the adapter encodes and
//! may also hold file streams.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use url::form_urlencoded;

use crate::error::{ApiError, TransportError, ValidationError};

/// Flat mapping from Claim.MD wire field name to value.
pub type FieldMap = BTreeMap<String, String>;

/// Fields handed to the request adapter.
pub type Fields = BTreeMap<String, FieldValue>;

/// How the request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`, one part per field.
    Multipart,
}

/// A single field value: plain text or a file stream.
#[derive(Debug)]
pub enum FieldValue {
    Text(String),
    Stream(FileStream),
}

impl FieldValue {
    pub fn is_stream(&self) -> bool {
        matches!(self, FieldValue::Stream(_))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<FileStream> for FieldValue {
    fn from(value: FileStream) -> Self {
        FieldValue::Stream(value)
    }
}

impl From<File> for FieldValue {
    fn from(value: File) -> Self {
        FieldValue::Stream(FileStream::new(value))
    }
}

/// A readable source sent as a file part of a multipart body.
///
/// The reader is consumed once, when the body is encoded.
pub struct FileStream {
    reader: Box<dyn Read + Send>,
    filename: Option<String>,
    content_type: Option<String>,
}

impl FileStream {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            filename: None,
            content_type: None,
        }
    }

    /// Open a file on disk; the part's filename is the path's final component.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut stream = Self::new(file);
        stream.filename = path.file_name().map(|name| name.to_string_lossy().into_owned());
        Ok(stream)
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

impl fmt::Debug for FileStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStream")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Lift a text-only mapping into adapter fields.
pub fn text_fields(map: FieldMap) -> Fields {
    map.into_iter().map(|(k, v)| (k, FieldValue::Text(v))).collect()
}

/// An encoded request body and the `Content-Type` describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub(crate) fn encode(fields: Fields, encoding: BodyEncoding) -> Result<EncodedBody, ApiError> {
    match encoding {
        BodyEncoding::Form => encode_form(fields),
        BodyEncoding::Multipart => {
            let boundary = format!("claimmd-{}", uuid::Uuid::new_v4().simple());
            Ok(encode_multipart(fields, &boundary)?)
        }
    }
}

/// Encode text fields as `application/x-www-form-urlencoded`.
pub(crate) fn encode_form(fields: Fields) -> Result<EncodedBody, ApiError> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        match value {
            FieldValue::Text(text) => {
                serializer.append_pair(&name, &text);
            }
            FieldValue::Stream(_) => {
                return Err(ValidationError::invalid(name, "is a stream and requires a multipart request").into());
            }
        }
    }
    Ok(EncodedBody {
        content_type: "application/x-www-form-urlencoded".to_string(),
        bytes: serializer.finish().into_bytes(),
    })
}

/// Encode fields as `multipart/form-data` delimited by `boundary`.
pub(crate) fn encode_multipart(fields: Fields, boundary: &str) -> Result<EncodedBody, TransportError> {
    let mut body = Vec::new();
    for (name, value) in fields {
        write!(body, "--{boundary}\r\n")?;
        match value {
            FieldValue::Text(text) => {
                write!(body, "Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape_quoted(&name))?;
                body.extend_from_slice(text.as_bytes());
            }
            FieldValue::Stream(mut stream) => {
                let filename = stream.filename.take().unwrap_or_else(|| name.clone());
                let content_type = stream
                    .content_type
                    .take()
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                write!(
                    body,
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {content_type}\r\n\r\n",
                    escape_quoted(&name),
                    escape_quoted(&filename),
                )?;
                stream.reader.read_to_end(&mut body)?;
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    write!(body, "--{boundary}--\r\n")?;

    Ok(EncodedBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        bytes: body,
    })
}

fn escape_quoted(value: &str) -> String {
    value.replace('"', "%22").replace('\r', "%0D").replace('\n', "%0A")
}
