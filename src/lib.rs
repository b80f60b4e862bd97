//! penpost: headless editor and publisher views for a blog REST API.
//!
//! Views are plain state machines (`application::editor`, `application::publisher`)
//! whose handlers return effects; `application::session` runs those effects
//! against the collaborators in `infra`. The `cli` module drives both views from
//! the command line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infra;
