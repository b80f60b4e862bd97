use std::sync::Mutex;

use tracing::warn;

use crate::application::ports::{AlertSink, Navigator};
use crate::domain::navigation::Route;

/// Router and alert surface for a one-shot command: remembers where the view
/// navigated and which alerts it raised. Nothing is printed here; the command
/// result carries the message to the user.
#[derive(Debug, Default)]
pub struct Console {
    route: Mutex<Option<Route>>,
    alerts: Mutex<Vec<String>>,
}

impl Console {
    pub fn route(&self) -> Option<Route> {
        self.route.lock().ok().and_then(|route| route.clone())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

impl Navigator for Console {
    fn navigate(&self, route: &Route) {
        match self.route.lock() {
            Ok(mut slot) => *slot = Some(route.clone()),
            Err(err) => warn!(%route, error = %err, "navigation lost"),
        }
    }
}

impl AlertSink for Console {
    fn alert(&self, message: &str) {
        match self.alerts.lock() {
            Ok(mut alerts) => alerts.push(message.to_string()),
            Err(err) => warn!(error = %err, "alert lost"),
        }
    }
}
