//! Client core for the attachments API.
//!
//! # Overview
//! Uploads files with a multipart `POST /v1/attachments?...` and removes
//! them with a JSON `POST /v1/attachments/remove`, attaching the configured
//! auth headers to both.
//!
//! # Design
//! - `AttachmentsClient` holds only an immutable `ClientConfig` and a
//!   `Transport`; there is no state shared between calls.
//! - Every operation has a `build_*` half that produces a plain-data
//!   `HttpRequest`, so hosts can execute requests with their own HTTP stack.
//!   The async half sends through the `Transport` and returns the response
//!   as-is.
//! - The three accepted parameter shapes are a tagged union
//!   (`CreateParams`) resolved in one place.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod params;
pub mod source;
pub mod transport;
pub mod types;

pub use auth::{authentication_headers, Credential};
pub use client::AttachmentsClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use multipart::{MultipartForm, Part};
pub use params::{CreateParams, QueryParams};
pub use source::Source;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Attachment, RemoveAttachment};
