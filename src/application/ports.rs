//! Collaborator traits the views and session talk to.
//!
//! Everything outside the view state machines sits behind one of these seams:
//! the blog backend, the credential source, the router, and the alert surface.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::navigation::Route;
use crate::domain::posts::{Post, PostFields, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request rejected by backend (status {status})")]
    Unauthorized { status: u16 },
    #[error("post not found")]
    NotFound,
    #[error("backend error: status {status} body {body}")]
    Server { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// The `/api/v1/blog` contract.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn fetch_post(&self, id: &PostId) -> Result<Post, ApiError>;

    /// Returns the identifier the backend assigned to the new post.
    async fn create_post(&self, fields: &PostFields) -> Result<PostId, ApiError>;

    async fn update_post(&self, id: &PostId, fields: &PostFields) -> Result<(), ApiError>;

    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError>;
}

/// Source of the raw authorization token sent with every backend request.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed token, mostly for tests and one-shot invocations.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Blocking alert surface, distinct from the transient banner.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}
