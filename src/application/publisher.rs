//! Publisher for new posts.

use std::time::Instant;

use tracing::{debug, error};

use crate::domain::navigation::Route;
use crate::domain::posts::PostFields;

use super::effects::{Effect, Outcome};
use super::messages;
use super::notice::{NoticePhase, NoticeTiming, TransientNotice};
use super::session::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherEvent {
    TitleChanged(String),
    ContentChanged(String),
    PublishRequested,
    /// Status of the list data shown elsewhere on the page.
    LoadingChanged(bool),
    Completed(Outcome),
    NoticeDue,
    Teardown,
}

/// What the page renders right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherScreen<'a> {
    Loading,
    Form {
        title: &'a str,
        content: &'a str,
        is_publishing: bool,
        error: Option<&'a str>,
        error_fading: bool,
    },
}

#[derive(Debug, Clone)]
pub struct PublisherView {
    fields: PostFields,
    is_publishing: bool,
    loading: bool,
    notice: TransientNotice,
    torn_down: bool,
}

impl PublisherView {
    pub fn new(timing: NoticeTiming) -> Self {
        Self {
            fields: PostFields::default(),
            is_publishing: false,
            loading: false,
            notice: TransientNotice::new(timing),
            torn_down: false,
        }
    }

    pub fn handle(&mut self, event: PublisherEvent, now: Instant) -> Vec<Effect> {
        if self.torn_down {
            debug!(?event, "publisher event after teardown ignored");
            return Vec::new();
        }

        match event {
            PublisherEvent::LoadingChanged(loading) => {
                self.loading = loading;
                Vec::new()
            }
            PublisherEvent::Completed(outcome) => self.complete(outcome),
            PublisherEvent::NoticeDue => match self.notice.advance(now) {
                Some(at) => vec![Effect::ScheduleNotice { at }],
                None => Vec::new(),
            },
            PublisherEvent::Teardown => {
                self.torn_down = true;
                self.notice.dismiss();
                vec![Effect::CancelNotice]
            }
            _ if self.loading => {
                debug!(?event, "publisher is loading; input ignored");
                Vec::new()
            }
            PublisherEvent::TitleChanged(title) => {
                self.fields.title = title;
                Vec::new()
            }
            PublisherEvent::ContentChanged(content) => {
                self.fields.content = content;
                Vec::new()
            }
            PublisherEvent::PublishRequested => self.publish(now),
        }
    }

    fn publish(&mut self, now: Instant) -> Vec<Effect> {
        if self.is_publishing {
            debug!("publish already in flight");
            return Vec::new();
        }

        if self.fields.ensure_complete().is_err() {
            let at = self.notice.show(messages::PUBLISH_MISSING_FIELDS, now);
            return vec![Effect::ScheduleNotice { at }];
        }

        self.is_publishing = true;
        vec![Effect::CreatePost {
            fields: self.fields.clone(),
        }]
    }

    fn complete(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::Created(result) => {
                self.is_publishing = false;
                match result {
                    Ok(id) => vec![Effect::Navigate(Route::PostDetail(id))],
                    Err(err) => {
                        error!(error = %err, "error creating blog post");
                        vec![Effect::Alert(messages::PUBLISH_FAILED.to_string())]
                    }
                }
            }
            other => {
                debug!(operation = other.operation(), "publisher ignores outcome");
                Vec::new()
            }
        }
    }

    pub fn screen(&self) -> PublisherScreen<'_> {
        if self.loading {
            return PublisherScreen::Loading;
        }
        PublisherScreen::Form {
            title: &self.fields.title,
            content: &self.fields.content,
            is_publishing: self.is_publishing,
            error: self.notice.message(),
            error_fading: self.notice.phase() == NoticePhase::Fading,
        }
    }

    pub fn is_publishing(&self) -> bool {
        self.is_publishing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn fields(&self) -> &PostFields {
        &self.fields
    }

    pub fn error_message(&self) -> Option<&str> {
        self.notice.message()
    }
}

impl Default for PublisherView {
    fn default() -> Self {
        Self::new(NoticeTiming::default())
    }
}

impl View for PublisherView {
    type Event = PublisherEvent;

    fn handle(&mut self, event: PublisherEvent, now: Instant) -> Vec<Effect> {
        PublisherView::handle(self, event, now)
    }

    fn completed(outcome: Outcome) -> PublisherEvent {
        PublisherEvent::Completed(outcome)
    }

    fn notice_due() -> PublisherEvent {
        PublisherEvent::NoticeDue
    }

    fn teardown() -> PublisherEvent {
        PublisherEvent::Teardown
    }

    fn error_message(&self) -> Option<&str> {
        PublisherView::error_message(self)
    }
}
