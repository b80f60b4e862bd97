//! Instructions emitted by view transitions and the outcomes fed back to them.

use std::time::Instant;

use crate::domain::navigation::Route;
use crate::domain::posts::{Post, PostFields, PostId};

use super::ports::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPost { id: PostId },
    CreatePost { fields: PostFields },
    UpdatePost { id: PostId, fields: PostFields },
    DeletePost { id: PostId },
    Navigate(Route),
    Alert(String),
    /// Replace the pending notification wake-up with one at `at`.
    ScheduleNotice { at: Instant },
    CancelNotice,
}

impl Effect {
    pub fn is_backend_call(&self) -> bool {
        matches!(
            self,
            Effect::FetchPost { .. }
                | Effect::CreatePost { .. }
                | Effect::UpdatePost { .. }
                | Effect::DeletePost { .. }
        )
    }
}

/// Result of a backend effect, delivered back to the view that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fetched(Result<Post, ApiError>),
    Created(Result<PostId, ApiError>),
    Updated(Result<(), ApiError>),
    Deleted(Result<(), ApiError>),
}

impl Outcome {
    pub fn operation(&self) -> &'static str {
        match self {
            Outcome::Fetched(_) => "fetch",
            Outcome::Created(_) => "create",
            Outcome::Updated(_) => "update",
            Outcome::Deleted(_) => "delete",
        }
    }
}
