//! Parameter shapes accepted by `AttachmentsClient::create`.
//!
//! # Design
//! Callers may describe an upload three ways: a bare access level, a flat set
//! of query parameters, or "object mode" where the query parameters and the
//! payload travel together. `CreateParams` makes the three shapes explicit and
//! `CreateParams::normalize` is the only place that turns them into the
//! canonical `(QueryParams, Source)` pair.

use serde_json::Value;

use crate::error::ApiError;
use crate::source::Source;

const ACCESS: &str = "access";

/// Ordered query parameters for the create endpoint.
///
/// Keys keep their insertion order; setting an existing key replaces the
/// value without moving it. `encode` always emits `access` first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Visibility of the uploaded file, e.g. `public`.
    pub fn access(self, value: impl Into<String>) -> Self {
        self.with(ACCESS, value)
    }

    /// What the attachment is for, e.g. `message`.
    pub fn for_target(self, value: impl Into<String>) -> Self {
        self.with("for", value)
    }

    pub fn user_id(self, value: impl Into<String>) -> Self {
        self.with("userId", value)
    }

    pub fn app_user_id(self, value: impl Into<String>) -> Self {
        self.with("appUserId", value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical order: `access` first, then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let access = self.entries.iter().filter(|(k, _)| k == ACCESS);
        let rest = self.entries.iter().filter(|(k, _)| k != ACCESS);
        access.chain(rest).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

impl TryFrom<&serde_json::Map<String, Value>> for QueryParams {
    type Error = ApiError;

    fn try_from(map: &serde_json::Map<String, Value>) -> Result<Self, Self::Error> {
        map.iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                other => Err(ApiError::InvalidArgument(format!(
                    "query parameter `{k}` must be a string, got {other}"
                ))),
            })
            .collect()
    }
}

/// The accepted shapes of create parameters.
#[derive(Debug)]
pub enum CreateParams {
    /// Shorthand for `{access: value}`.
    Access(String),
    /// Flat query parameters; the source is passed separately.
    Query(QueryParams),
    /// Query parameters and payload together.
    Object {
        props: QueryParams,
        source: Option<Source>,
    },
}

impl CreateParams {
    pub fn object(props: QueryParams, source: Source) -> Self {
        CreateParams::Object {
            props,
            source: Some(source),
        }
    }

    /// Resolve the query parameters and the payload.
    ///
    /// An explicit `source` takes precedence over one carried in object mode.
    /// Fails with `InvalidArgument` when neither is present.
    pub fn normalize(self, source: Option<Source>) -> Result<(QueryParams, Source), ApiError> {
        let (props, embedded) = match self {
            CreateParams::Access(access) => (QueryParams::new().access(access), None),
            CreateParams::Query(props) => (props, None),
            CreateParams::Object { props, source } => (props, source),
        };
        let source = source.or(embedded).ok_or_else(|| {
            ApiError::InvalidArgument("no source provided for attachment upload".to_string())
        })?;
        Ok((props, source))
    }
}

impl From<&str> for CreateParams {
    fn from(access: &str) -> Self {
        CreateParams::Access(access.to_string())
    }
}

impl From<String> for CreateParams {
    fn from(access: String) -> Self {
        CreateParams::Access(access)
    }
}

impl From<QueryParams> for CreateParams {
    fn from(props: QueryParams) -> Self {
        CreateParams::Query(props)
    }
}

impl<K, V> From<Vec<(K, V)>> for CreateParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        CreateParams::Query(entries.into_iter().collect())
    }
}

/// Accepts loosely-typed JSON input: a string, a flat object of strings, or
/// an object with a `props` object (object mode, no embedded source).
impl TryFrom<Value> for CreateParams {
    type Error = ApiError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(access) => Ok(CreateParams::Access(access)),
            Value::Object(map) => match map.get("props") {
                Some(Value::Object(props)) => Ok(CreateParams::Object {
                    props: QueryParams::try_from(props)?,
                    source: None,
                }),
                Some(other) => Err(ApiError::InvalidArgument(format!(
                    "`props` must be an object, got {other}"
                ))),
                None => Ok(CreateParams::Query(QueryParams::try_from(&map)?)),
            },
            other => Err(ApiError::InvalidArgument(format!(
                "create params must be a string or an object, got {other}"
            ))),
        }
    }
}
