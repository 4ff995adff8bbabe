//! Port traits — the hexagonal boundary between domain logic and the platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! The ambient runtime objects an error-first program normally reaches for
//! as globals (timers, environment, process, console) are injected through
//! these traits instead.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core is testable with mocks.

use std::sync::Arc;
use core::time::Duration;

use super::events::AppEvent;

/// A deferred unit of work handed to a [`TimerPort`].
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

// ───────────────────────────────────────────────────────────────
// Timer port (driven adapter: domain → scheduler)
// ───────────────────────────────────────────────────────────────

/// One-shot timer: `setTimeout` as a port.
///
/// Implementations run `task` exactly once, no earlier than `delay` from
/// the call, on whatever thread they choose.  Returning `Err` means the
/// task was not scheduled and will never run.
pub trait TimerPort {
    fn set_timeout(&self, delay: Duration, task: TimerTask) -> Result<(), TimerError>;
}

impl<P: TimerPort + ?Sized> TimerPort for Arc<P> {
    fn set_timeout(&self, delay: Duration, task: TimerTask) -> Result<(), TimerError> {
        (**self).set_timeout(delay, task)
    }
}

impl<P: TimerPort + ?Sized> TimerPort for &P {
    fn set_timeout(&self, delay: Duration, task: TimerTask) -> Result<(), TimerError> {
        (**self).set_timeout(delay, task)
    }
}

// ───────────────────────────────────────────────────────────────
// Environment port (driven adapter: platform → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side view of the process environment.
pub trait EnvPort {
    /// Value of an environment variable, `None` if unset or not UTF-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Command-line arguments, program name first.
    fn args(&self) -> Vec<String>;
}

// ───────────────────────────────────────────────────────────────
// Process port (driven adapter: domain → platform)
// ───────────────────────────────────────────────────────────────

/// Process-control handle.
pub trait ProcessPort {
    /// Terminate with `code`.  Real adapters do not return; test doubles
    /// record the code and return.
    fn exit(&mut self, code: i32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / listeners)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (log output, an in-process emitter, a test log).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`TimerPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The timer no longer accepts work.
    Shutdown,
    /// The backing worker could not be started.
    SpawnFailed,
}

impl core::fmt::Display for TimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "timer shut down"),
            Self::SpawnFailed => write!(f, "timer thread spawn failed"),
        }
    }
}
