//! Wire DTOs for the attachments service.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently.
//! Integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// An uploaded attachment as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub media_url: String,
    pub media_type: String,
}

/// Body of a remove request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAttachment {
    pub media_url: String,
}

impl RemoveAttachment {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }
}
