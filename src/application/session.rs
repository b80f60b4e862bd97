//! Executes view effects against the injected collaborators.
//!
//! A session owns one view. Backend effects are awaited one at a time and their
//! outcomes are fed straight back into the view, so a single user gesture runs
//! to completion (request, response, navigation or error) inside `dispatch`.
//! The notification wake-up is the only deferred work; the session keeps at
//! most one pending instant for it.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use super::effects::{Effect, Outcome};
use super::ports::{AlertSink, BlogApi, Navigator};

/// A headless page: pure transitions from events to effects.
pub trait View {
    type Event: std::fmt::Debug;

    fn handle(&mut self, event: Self::Event, now: Instant) -> Vec<Effect>;

    fn completed(outcome: Outcome) -> Self::Event;

    fn notice_due() -> Self::Event;

    fn teardown() -> Self::Event;

    fn error_message(&self) -> Option<&str>;
}

#[derive(Clone)]
pub struct SessionDeps {
    pub api: Arc<dyn BlogApi>,
    pub navigator: Arc<dyn Navigator>,
    pub alerts: Arc<dyn AlertSink>,
}

pub struct Session<V: View> {
    view: V,
    deps: SessionDeps,
    notice_deadline: Option<Instant>,
}

impl<V: View> Session<V> {
    pub fn new(view: V, deps: SessionDeps) -> Self {
        Self {
            view,
            deps,
            notice_deadline: None,
        }
    }

    /// Run effects produced outside `dispatch`, typically by mounting the view.
    pub async fn start(&mut self, effects: Vec<Effect>) {
        self.run(effects).await;
    }

    pub async fn dispatch(&mut self, event: V::Event) {
        let effects = self.view.handle(event, now());
        self.run(effects).await;
    }

    /// Sleep through pending notification transitions until the banner is idle.
    pub async fn settle_notice(&mut self) {
        while let Some(deadline) = self.notice_deadline.take() {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
            let effects = self.view.handle(V::notice_due(), now());
            self.run(effects).await;
        }
    }

    /// Tear the view down, dropping any pending wake-up, and hand it back.
    pub async fn close(mut self) -> V {
        let effects = self.view.handle(V::teardown(), now());
        self.run(effects).await;
        self.notice_deadline = None;
        self.view
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notice_deadline(&self) -> Option<Instant> {
        self.notice_deadline
    }

    #[instrument(level = "debug", skip_all)]
    async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            debug!(?effect, backend = effect.is_backend_call(), "executing effect");
            let outcome = match effect {
                Effect::FetchPost { id } => Outcome::Fetched(self.deps.api.fetch_post(&id).await),
                Effect::CreatePost { fields } => {
                    Outcome::Created(self.deps.api.create_post(&fields).await)
                }
                Effect::UpdatePost { id, fields } => {
                    Outcome::Updated(self.deps.api.update_post(&id, &fields).await)
                }
                Effect::DeletePost { id } => Outcome::Deleted(self.deps.api.delete_post(&id).await),
                Effect::Navigate(route) => {
                    self.deps.navigator.navigate(&route);
                    continue;
                }
                Effect::Alert(message) => {
                    self.deps.alerts.alert(&message);
                    continue;
                }
                Effect::ScheduleNotice { at } => {
                    self.notice_deadline = Some(at);
                    continue;
                }
                Effect::CancelNotice => {
                    self.notice_deadline = None;
                    continue;
                }
            };
            let follow_up = self.view.handle(V::completed(outcome), now());
            queue.extend(follow_up);
        }
    }
}

// Read through tokio so paused test clocks drive the notification.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
