//! HTTP request and response types described as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values without touching the network. A
//! `Transport` (or any host code) executes them and hands back an
//! `HttpResponse`, which the client returns untouched.
//!
//! `headers` carries only what the caller configured (the auth headers). The
//! body's content type travels with the body itself, so executors apply it
//! when they encode the payload.

use serde_json::Value;

use crate::multipart::MultipartForm;

/// HTTP method for a request. Both attachments endpoints are `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Json(Value),
    Multipart(MultipartForm),
}

impl HttpBody {
    /// Media type of the payload. Multipart executors add the boundary.
    pub fn content_type(&self) -> &'static str {
        match self {
            HttpBody::Json(_) => "application/json",
            HttpBody::Multipart(_) => "multipart/form-data",
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            HttpBody::Json(value) => Some(value),
            HttpBody::Multipart(_) => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            HttpBody::Multipart(form) => Some(form),
            HttpBody::Json(_) => None,
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `AttachmentsClient::build_*`. Executed by a `Transport` or by
/// the caller directly.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

/// An HTTP response described as plain data. The client never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipart::Part;
    use serde_json::json;

    #[test]
    fn json_body_accessors() {
        let body = HttpBody::Json(json!({"mediaUrl": "http://x/doc.pdf"}));
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body.as_json(), Some(&json!({"mediaUrl": "http://x/doc.pdf"})));
        assert!(body.as_multipart().is_none());
    }

    #[test]
    fn multipart_body_accessors() {
        let form = MultipartForm::new().part(Part::text("k", "v"));
        let body = HttpBody::Multipart(form.clone());
        assert_eq!(body.content_type(), "multipart/form-data");
        assert_eq!(body.as_multipart(), Some(&form));
        assert!(body.as_json().is_none());
    }

    #[test]
    fn method_name() {
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }

    #[test]
    fn success_range() {
        let mut response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 404;
        assert!(!response.is_success());
    }
}
