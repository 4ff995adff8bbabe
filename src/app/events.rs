//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, fan them out to emitter
//! listeners, or record them in a test.

use super::catalog::{Trail, User};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service is ready; carries whether development mode is on.
    Started { development: bool },

    /// A user lookup resolved.
    UserFound { id: u32, user: User },

    /// A trail lookup resolved.
    TrailFound { name: String, trail: Trail },

    /// A lookup rejected, timed out, or could not be scheduled.
    LookupFailed { subject: String, reason: String },

    /// The service asked the process to exit with this code.
    Exiting(i32),
}

impl AppEvent {
    /// Every event name, in declaration order.
    pub const NAMES: [&'static str; 5] = [
        "started",
        "user-found",
        "trail-found",
        "lookup-failed",
        "exiting",
    ];

    /// Stable name used to route the event to emitter listeners.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started { .. } => Self::NAMES[0],
            Self::UserFound { .. } => Self::NAMES[1],
            Self::TrailFound { .. } => Self::NAMES[2],
            Self::LookupFailed { .. } => Self::NAMES[3],
            Self::Exiting(_) => Self::NAMES[4],
        }
    }
}
