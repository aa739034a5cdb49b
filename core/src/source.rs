//! Upload payloads.
//!
//! A `Source` is consumed by value when a create request is built, so the
//! client never holds on to the caller's stream after the call returns.

use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::multipart::Part;

const DEFAULT_FILE_NAME: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A readable byte stream holding the content of an attachment.
pub struct Source {
    reader: Box<dyn Read + Send>,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl Source {
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            file_name: None,
            content_type: None,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Cursor::new(bytes.into()))
    }

    /// Open a file on disk. The file name and a guessed content type are
    /// taken from the path.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let content_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self {
            reader: Box::new(file),
            file_name,
            content_type,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Drain the stream into a multipart file part named `field`.
    pub fn into_part(mut self, field: &str) -> std::io::Result<Part> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        Ok(Part::file(
            field,
            self.file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            self.content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            data,
        ))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&'static [u8]> for Source {
    fn from(bytes: &'static [u8]) -> Self {
        Self::from_bytes(bytes)
    }
}
