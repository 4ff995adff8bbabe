//! Process environment adapter.
//!
//! Implements [`EnvPort`] on top of `std::env`.

use crate::app::ports::EnvPort;

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl StdEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvPort for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn args(&self) -> Vec<String> {
        std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}
