//! Error types for the attachments client.
//!
//! # Design
//! `ApiError` separates failures raised while *building* a request
//! (`InvalidArgument`, `Serialization`, `Source`) from failures reported by
//! the transport. The client never interprets transport failures; they are
//! carried through `ApiError::Transport` exactly as the transport produced
//! them.

use thiserror::Error;

/// Errors returned by `AttachmentsClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller supplied parameters the client cannot turn into a request,
    /// e.g. a create call with no upload source.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The upload source could not be read.
    #[error("failed to read upload source: {0}")]
    Source(#[from] std::io::Error),

    /// The transport rejected the request.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures reported by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The request body could not be encoded; nothing was sent.
    #[error("failed to encode request body: {0}")]
    Body(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors raised while assembling a `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
