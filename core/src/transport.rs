//! Async execution of `HttpRequest` values.
//!
//! # Design
//! `Transport` is the seam between the request builders and the network.
//! The client hands it a fully built request and returns whatever comes back.
//! Retries, pooling and timeouts belong to the implementation, not to the
//! client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::TransportError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::MultipartForm;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request`. Non-2xx responses are reported as
    /// `TransportError::Status`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// `Transport` backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client, e.g. one with a timeout or proxy.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            Some(HttpBody::Json(value)) => {
                let bytes =
                    serde_json::to_vec(&value).map_err(|e| TransportError::Body(e.to_string()))?;
                builder.header(CONTENT_TYPE, "application/json").body(bytes)
            }
            Some(HttpBody::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.into_parts() {
        let mut field = reqwest::multipart::Part::bytes(part.data);
        if let Some(file_name) = part.file_name {
            field = field.file_name(file_name);
        }
        if let Some(content_type) = part.content_type {
            field = field
                .mime_str(&content_type)
                .map_err(|e| TransportError::Body(format!("invalid content type: {e}")))?;
        }
        out = out.part(part.name, field);
    }
    Ok(out)
}
