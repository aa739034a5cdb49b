//! `multipart/form-data` payloads described as plain data.
//!
//! # Design
//! The form is kept as a list of parts so a built request can be inspected
//! in tests. Wire encoding belongs to the executor: `ReqwestTransport` turns
//! the form into a `reqwest::multipart::Form`.

use mime_guess::mime::Mime;

use crate::error::ApiError;

/// A single field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Part {
    /// A plain text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: value.into().into_bytes(),
        }
    }

    /// A file field carrying raw bytes.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data,
        }
    }
}

/// An ordered list of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// Look up a part by field name.
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// Parse a part content type, rejecting anything that is not a single
/// well-formed MIME type.
pub fn parse_content_type(content_type: &str) -> Result<Mime, ApiError> {
    content_type.parse::<Mime>().map_err(|e| {
        ApiError::InvalidArgument(format!("invalid content type {content_type:?}: {e}"))
    })
}
