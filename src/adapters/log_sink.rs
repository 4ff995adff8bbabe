//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  The emitter adapter in [`crate::emitter`] implements
//! the same trait for in-process listeners.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { development } => {
                info!("START | development={}", development);
            }
            AppEvent::UserFound { id, user } => {
                info!("USER  | id={} | nickname={}", id, user.nickname);
            }
            AppEvent::TrailFound { name, trail } => {
                info!(
                    "TRAIL | name={} | nickname={} | miles={}",
                    name, trail.nickname, trail.miles
                );
            }
            AppEvent::LookupFailed { subject, reason } => {
                warn!("FAIL  | {} | {}", subject, reason);
            }
            AppEvent::Exiting(code) => {
                info!("EXIT  | code={}", code);
            }
        }
    }
}
