//! Authentication headers for the attachments service.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credentials accepted by the service.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A signed JWT, sent as a bearer token.
    Jwt(String),
    /// An app token, sent in the `app-token` header.
    AppToken(String),
    /// A key id / secret pair, sent as HTTP basic auth.
    Basic { key_id: String, secret: String },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Jwt(_) => f.write_str("Credential::Jwt(..)"),
            Credential::AppToken(_) => f.write_str("Credential::AppToken(..)"),
            Credential::Basic { key_id, .. } => f
                .debug_struct("Credential::Basic")
                .field("key_id", key_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Headers to attach to every request made with `credential`.
pub fn authentication_headers(credential: &Credential) -> Vec<(String, String)> {
    match credential {
        Credential::Jwt(jwt) => vec![("Authorization".to_string(), format!("Bearer {jwt}"))],
        Credential::AppToken(token) => vec![("app-token".to_string(), token.clone())],
        Credential::Basic { key_id, secret } => {
            let encoded = STANDARD.encode(format!("{key_id}:{secret}"));
            vec![("Authorization".to_string(), format!("Basic {encoded}"))]
        }
    }
}
