//! Unified error types for the errback crate.
//!
//! The adapter core (`deferred`, `errback`, `adapter`) has no error type of
//! its own: the wrapped operation's error travels verbatim.  This enum is
//! what the application layer funnels into when it combines lookups,
//! timeouts, timer setup, and configuration.

use core::fmt;

use crate::app::catalog::LookupError;
use crate::app::ports::TimerError;
use crate::timeout::TimedOut;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible application-level operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The wrapped lookup called back with an error.
    Lookup(LookupError),
    /// The deferred result did not settle before the configured deadline.
    TimedOut,
    /// The timer port refused to schedule the operation (setup failure).
    Timer(TimerError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// A numeric configuration field is above its limit.
    ConfigLimit { field: &'static str, max: u32 },
    /// The configuration document is not valid JSON.
    MalformedConfig { line: usize, column: usize },
}

impl Error {
    /// Process exit code used when a failure is reported.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Lookup(_) | Self::TimedOut => 1,
            Self::Timer(_) => 70,
            Self::Config(_) | Self::ConfigLimit { .. } | Self::MalformedConfig { .. } => 78,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup(e) => write!(f, "lookup: {e}"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Timer(e) => write!(f, "timer: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::ConfigLimit { field, max } => write!(f, "config: {field} exceeds {max}"),
            Self::MalformedConfig { line, column } => {
                write!(f, "config: malformed JSON at line {line}, column {column}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<LookupError> for Error {
    fn from(e: LookupError) -> Self {
        Self::Lookup(e)
    }
}

impl From<TimedOut> for Error {
    fn from(_: TimedOut) -> Self {
        Self::TimedOut
    }
}

impl From<TimerError> for Error {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
