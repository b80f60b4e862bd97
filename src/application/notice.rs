//! Transient error banner: `Idle -> Visible -> Fading -> Idle`.
//!
//! The notice never owns a timer. Every transition that needs a later wake-up
//! reports the instant, and the session keeps exactly one pending wake-up, so a
//! replaced or dismissed message cannot be touched by a stale callback.

use std::time::{Duration, Instant};

pub const DEFAULT_FADE_AFTER: Duration = Duration::from_millis(2500);
pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTiming {
    pub fade_after: Duration,
    pub clear_after: Duration,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        Self {
            fade_after: DEFAULT_FADE_AFTER,
            clear_after: DEFAULT_CLEAR_AFTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Idle,
    Visible,
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NoticeState {
    Idle,
    Visible { message: String, set_at: Instant },
    Fading { message: String, set_at: Instant },
}

#[derive(Debug, Clone)]
pub struct TransientNotice {
    timing: NoticeTiming,
    state: NoticeState,
}

impl TransientNotice {
    pub fn new(timing: NoticeTiming) -> Self {
        Self {
            timing,
            state: NoticeState::Idle,
        }
    }

    /// Show `message` from `now`, replacing whatever was displayed. Returns the
    /// instant of the next transition.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> Instant {
        self.state = NoticeState::Visible {
            message: message.into(),
            set_at: now,
        };
        now + self.timing.fade_after
    }

    /// Apply every transition due at `now`. Returns the next wake-up, if any.
    pub fn advance(&mut self, now: Instant) -> Option<Instant> {
        let set_at = match &self.state {
            NoticeState::Idle => return None,
            NoticeState::Visible { set_at, .. } | NoticeState::Fading { set_at, .. } => *set_at,
        };
        let elapsed = now.saturating_duration_since(set_at);

        if elapsed >= self.timing.clear_after {
            self.state = NoticeState::Idle;
            return None;
        }

        if elapsed >= self.timing.fade_after {
            if let NoticeState::Visible { message, set_at } = &self.state {
                self.state = NoticeState::Fading {
                    message: message.clone(),
                    set_at: *set_at,
                };
            }
            return Some(set_at + self.timing.clear_after);
        }

        Some(set_at + self.timing.fade_after)
    }

    pub fn dismiss(&mut self) {
        self.state = NoticeState::Idle;
    }

    pub fn phase(&self) -> NoticePhase {
        match self.state {
            NoticeState::Idle => NoticePhase::Idle,
            NoticeState::Visible { .. } => NoticePhase::Visible,
            NoticeState::Fading { .. } => NoticePhase::Fading,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            NoticeState::Idle => None,
            NoticeState::Visible { message, .. } | NoticeState::Fading { message, .. } => {
                Some(message)
            }
        }
    }

    pub fn timing(&self) -> NoticeTiming {
        self.timing
    }
}

impl Default for TransientNotice {
    fn default() -> Self {
        Self::new(NoticeTiming::default())
    }
}
