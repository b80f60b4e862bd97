//! Post entity and the title/content payload shared by create and update.

use std::fmt;

use penpost_api_types::{PostResponse, PostWriteRequest};

use super::error::DomainError;

/// Backend-assigned identifier. Opaque to the client; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostId(String);

impl PostId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A post known to exist on the backend. Title and content may be absent when
/// only the identifier was handed to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Post {
    pub fn from_id(id: PostId) -> Self {
        Self {
            id,
            title: None,
            content: None,
        }
    }

    /// Both fields present and non-empty; otherwise the editor must fetch.
    pub fn is_complete(&self) -> bool {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        filled(&self.title) && filled(&self.content)
    }

    pub fn from_response(id: PostId, response: PostResponse) -> Self {
        Self {
            id,
            title: response.title,
            content: response.content,
        }
    }
}

/// Title and content as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
}

impl PostFields {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Presence check applied before publishing. Whitespace counts as content.
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(DomainError::validation("title and content are required"));
        }
        Ok(())
    }
}

impl From<&PostFields> for PostWriteRequest {
    fn from(fields: &PostFields) -> Self {
        Self {
            title: fields.title.clone(),
            content: fields.content.clone(),
        }
    }
}
