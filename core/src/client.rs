//! Attachments API client.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and an async method that hands that request to the
//! configured `Transport`. The build half is deterministic and has no I/O
//! beyond draining the caller's upload source, so hosts that do their own
//! networking can use it directly. The async half returns the transport's
//! response untouched.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::{parse_content_type, MultipartForm, Part};
use crate::params::CreateParams;
use crate::source::Source;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Attachment, RemoveAttachment};

/// Multipart field that carries the uploaded file.
pub const SOURCE_FIELD: &str = "source";

const ATTACHMENTS_PATH: &str = "/v1/attachments";
const REMOVE_PATH: &str = "/v1/attachments/remove";

/// Client for the attachments endpoints.
///
/// Holds only the immutable `ClientConfig` and a transport, so a single
/// instance can serve concurrent calls through `&self`.
#[derive(Debug, Clone)]
pub struct AttachmentsClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl AttachmentsClient<ReqwestTransport> {
    /// Client using a default `reqwest` transport.
    pub fn with_reqwest(config: ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }
}

impl<T> AttachmentsClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the upload request.
    ///
    /// `source` may be omitted when `params` is in object mode and carries
    /// its own source. The source is read to the end on the calling thread;
    /// `create` does the same read on the blocking pool instead.
    pub fn build_create(
        &self,
        params: impl Into<CreateParams>,
        source: impl Into<Option<Source>>,
    ) -> Result<HttpRequest, ApiError> {
        let (url, source) = self.upload_target(params.into(), source.into())?;
        let part = source.into_part(SOURCE_FIELD)?;
        Ok(self.upload_request(url, part))
    }

    /// Resolve the upload URL and payload, validating the payload's content
    /// type before anything is read.
    fn upload_target(
        &self,
        params: CreateParams,
        source: Option<Source>,
    ) -> Result<(String, Source), ApiError> {
        let (query, source) = params.normalize(source)?;
        if let Some(content_type) = source.content_type() {
            parse_content_type(content_type)?;
        }

        let mut url = format!("{}{ATTACHMENTS_PATH}", self.config.service_url());
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        Ok((url, source))
    }

    fn upload_request(&self, url: String, part: Part) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: self.config.auth_headers().to_vec(),
            body: Some(HttpBody::Multipart(MultipartForm::new().part(part))),
        }
    }

    /// Build the remove request. `body` is sent as JSON exactly as given.
    pub fn build_delete<B: Serialize + ?Sized>(&self, body: &B) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_value(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{REMOVE_PATH}", self.config.service_url()),
            headers: self.config.auth_headers().to_vec(),
            body: Some(HttpBody::Json(body)),
        })
    }

    /// Decode the attachment returned by a successful upload.
    pub fn parse_create(&self, response: &HttpResponse) -> Result<Attachment, ApiError> {
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

impl<T: Transport> AttachmentsClient<T> {
    /// Upload an attachment.
    pub async fn create(
        &self,
        params: impl Into<CreateParams>,
        source: impl Into<Option<Source>>,
    ) -> Result<HttpResponse, ApiError> {
        let (url, source) = self.upload_target(params.into(), source.into())?;
        let part = tokio::task::spawn_blocking(move || source.into_part(SOURCE_FIELD))
            .await
            .map_err(|e| ApiError::Source(std::io::Error::other(e)))??;
        self.dispatch(self.upload_request(url, part)).await
    }

    /// Remove an attachment identified by `body`.
    pub async fn delete<B: Serialize + Sync + ?Sized>(
        &self,
        body: &B,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_delete(body)?;
        self.dispatch(request).await
    }

    /// Remove the attachment stored at `media_url`.
    pub async fn remove(&self, media_url: &str) -> Result<HttpResponse, ApiError> {
        self.delete(&RemoveAttachment::new(media_url)).await
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            scope = self.config.scope(),
            "sending attachments request"
        );
        self.transport.send(request).await.map_err(|e| {
            tracing::warn!(error = %e, "attachments request failed");
            ApiError::Transport(e)
        })
    }
}
