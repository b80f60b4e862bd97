//! Wire shapes for the `/api/v1/blog` endpoints.
//!
//! The backend owns these payloads; unknown response fields are retained in
//! `extra` so callers can inspect them without this crate tracking every column.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Base path of every blog endpoint, relative to the backend origin.
pub const BLOG_API_BASE: &str = "api/v1/blog";

/// Body of `POST /create` and `PUT /update/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWriteRequest {
    pub title: String,
    pub content: String,
}

/// Body returned by `GET /{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostResponse {
    #[serde(default, deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned by `POST /create`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostCreatedResponse {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Identifiers arrive as strings from most backends and as integers from some.
fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}

fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}
