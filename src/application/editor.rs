//! Editor for an existing post: fetch on mount, update, and gated delete.

use std::time::Instant;

use tracing::{debug, error};

use crate::domain::navigation::Route;
use crate::domain::posts::{Post, PostFields, PostId};

use super::confirm::ConfirmationGate;
use super::effects::{Effect, Outcome};
use super::messages;
use super::notice::{NoticePhase, NoticeTiming, TransientNotice};
use super::session::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    TitleChanged(String),
    ContentChanged(String),
    UpdateRequested,
    DeleteRequested,
    DeleteConfirmed,
    DeleteCancelled,
    Completed(Outcome),
    NoticeDue,
    Teardown,
}

#[derive(Debug, Clone)]
pub struct EditorView {
    id: PostId,
    title: String,
    content: String,
    notice: TransientNotice,
    gate: ConfirmationGate,
    torn_down: bool,
}

impl EditorView {
    /// Seed the form from `post`. When title or content is missing the
    /// returned effects hold a single fetch for the post.
    pub fn mount(post: Post, timing: NoticeTiming) -> (Self, Vec<Effect>) {
        let needs_fetch = !post.is_complete();
        let Post { id, title, content } = post;

        let effects = if needs_fetch {
            debug!(post_id = %id, "editor mounted without full post; fetching");
            vec![Effect::FetchPost { id: id.clone() }]
        } else {
            Vec::new()
        };

        let mut view = Self::unloaded(id, timing);
        view.title = title.unwrap_or_default();
        view.content = content.unwrap_or_default();
        (view, effects)
    }

    /// Editor for `id` with an empty form and no fetch, for flows that only
    /// delete.
    pub fn unloaded(id: PostId, timing: NoticeTiming) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            notice: TransientNotice::new(timing),
            gate: ConfirmationGate::default(),
            torn_down: false,
        }
    }

    pub fn handle(&mut self, event: EditorEvent, now: Instant) -> Vec<Effect> {
        if self.torn_down {
            debug!(post_id = %self.id, ?event, "editor event after teardown ignored");
            return Vec::new();
        }

        match event {
            EditorEvent::TitleChanged(title) => {
                self.title = title;
                Vec::new()
            }
            EditorEvent::ContentChanged(content) => {
                self.content = content;
                Vec::new()
            }
            EditorEvent::UpdateRequested => vec![Effect::UpdatePost {
                id: self.id.clone(),
                fields: self.fields(),
            }],
            EditorEvent::DeleteRequested => {
                self.gate.open();
                Vec::new()
            }
            EditorEvent::DeleteConfirmed => {
                if self.gate.confirm() {
                    vec![Effect::DeletePost {
                        id: self.id.clone(),
                    }]
                } else {
                    Vec::new()
                }
            }
            EditorEvent::DeleteCancelled => {
                self.gate.cancel();
                Vec::new()
            }
            EditorEvent::Completed(outcome) => self.complete(outcome, now),
            EditorEvent::NoticeDue => match self.notice.advance(now) {
                Some(at) => vec![Effect::ScheduleNotice { at }],
                None => Vec::new(),
            },
            EditorEvent::Teardown => {
                self.torn_down = true;
                self.notice.dismiss();
                self.gate.cancel();
                vec![Effect::CancelNotice]
            }
        }
    }

    fn complete(&mut self, outcome: Outcome, now: Instant) -> Vec<Effect> {
        match outcome {
            Outcome::Fetched(Ok(post)) => {
                self.title = post.title.unwrap_or_default();
                self.content = post.content.unwrap_or_default();
                Vec::new()
            }
            Outcome::Fetched(Err(err)) => {
                error!(post_id = %self.id, error = %err, "error fetching blog details");
                self.show_error(messages::FETCH_FAILED, now)
            }
            Outcome::Updated(Ok(())) => vec![Effect::Navigate(Route::PostDetail(self.id.clone()))],
            Outcome::Updated(Err(err)) => {
                error!(post_id = %self.id, error = %err, "error updating blog");
                self.show_error(messages::UPDATE_DENIED, now)
            }
            Outcome::Deleted(Ok(())) => vec![Effect::Navigate(Route::PostListing)],
            Outcome::Deleted(Err(err)) => {
                error!(post_id = %self.id, error = %err, "error deleting blog");
                self.show_error(messages::DELETE_DENIED, now)
            }
            Outcome::Created(_) => {
                debug!(post_id = %self.id, "editor ignores create outcome");
                Vec::new()
            }
        }
    }

    fn show_error(&mut self, message: &str, now: Instant) -> Vec<Effect> {
        let at = self.notice.show(message, now);
        vec![Effect::ScheduleNotice { at }]
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn fields(&self) -> PostFields {
        PostFields::new(self.title.clone(), self.content.clone())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.notice.message()
    }

    pub fn notice_phase(&self) -> NoticePhase {
        self.notice.phase()
    }

    pub fn delete_confirmation_pending(&self) -> bool {
        self.gate.is_open()
    }
}

impl View for EditorView {
    type Event = EditorEvent;

    fn handle(&mut self, event: EditorEvent, now: Instant) -> Vec<Effect> {
        EditorView::handle(self, event, now)
    }

    fn completed(outcome: Outcome) -> EditorEvent {
        EditorEvent::Completed(outcome)
    }

    fn notice_due() -> EditorEvent {
        EditorEvent::NoticeDue
    }

    fn teardown() -> EditorEvent {
        EditorEvent::Teardown
    }

    fn error_message(&self) -> Option<&str> {
        EditorView::error_message(self)
    }
}
