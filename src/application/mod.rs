//! View state machines and the session that executes their effects.

pub mod confirm;
pub mod editor;
pub mod effects;
pub mod error;
pub mod messages;
pub mod notice;
pub mod ports;
pub mod publisher;
pub mod session;
