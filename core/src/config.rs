//! Client configuration.
//!
//! # Design
//! `ClientConfig` is immutable after construction and owned by a single
//! client. Only the service URL is validated; the auth headers and scope are
//! opaque to the client and forwarded as-is.

use crate::auth::{authentication_headers, Credential};
use crate::error::ConfigError;

pub const ENV_SERVICE_URL: &str = "ATTACHMENTS_SERVICE_URL";
pub const ENV_SCOPE: &str = "ATTACHMENTS_SCOPE";
pub const ENV_JWT: &str = "ATTACHMENTS_JWT";
pub const ENV_APP_TOKEN: &str = "ATTACHMENTS_APP_TOKEN";
pub const ENV_KEY_ID: &str = "ATTACHMENTS_KEY_ID";
pub const ENV_SECRET: &str = "ATTACHMENTS_SECRET";

const DEFAULT_SCOPE: &str = "app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    service_url: String,
    auth_headers: Vec<(String, String)>,
    scope: String,
}

impl ClientConfig {
    pub fn new(
        service_url: &str,
        auth_headers: Vec<(String, String)>,
        scope: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let service_url = service_url.trim().trim_end_matches('/');
        if service_url.is_empty() {
            return Err(ConfigError::Missing("service_url"));
        }
        Ok(Self {
            service_url: service_url.to_string(),
            auth_headers,
            scope: scope.into(),
        })
    }

    /// Build a config whose auth headers are derived from `credential`.
    pub fn with_credential(
        service_url: &str,
        credential: &Credential,
        scope: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::new(service_url, authentication_headers(credential), scope)
    }

    /// Read the configuration from `ATTACHMENTS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let service_url = get(ENV_SERVICE_URL).ok_or(ConfigError::Missing(ENV_SERVICE_URL))?;
        let scope = get(ENV_SCOPE).unwrap_or_else(|| DEFAULT_SCOPE.to_string());

        let basic = match (get(ENV_KEY_ID), get(ENV_SECRET)) {
            (Some(key_id), Some(secret)) => Some(Credential::Basic { key_id, secret }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(ENV_SECRET)),
            (None, Some(_)) => return Err(ConfigError::Missing(ENV_KEY_ID)),
        };
        let candidates: Vec<Credential> = [
            get(ENV_JWT).map(Credential::Jwt),
            get(ENV_APP_TOKEN).map(Credential::AppToken),
            basic,
        ]
        .into_iter()
        .flatten()
        .collect();

        let credential = match candidates.as_slice() {
            [one] => one,
            [] => return Err(ConfigError::Missing(ENV_JWT)),
            _ => {
                return Err(ConfigError::Invalid {
                    key: ENV_JWT,
                    reason: format!(
                        "set only one of {ENV_JWT}, {ENV_APP_TOKEN} or {ENV_KEY_ID}/{ENV_SECRET}"
                    ),
                })
            }
        };

        Self::with_credential(&service_url, credential, scope)
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn auth_headers(&self) -> &[(String, String)] {
        &self.auth_headers
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}
