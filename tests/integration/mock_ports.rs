//! Mock port adapters for integration tests.
//!
//! Records every event and exit request so tests can assert on the full
//! history without touching the real process or environment.

use errback::app::events::AppEvent;
use errback::app::ports::{EnvPort, EventSink, ProcessPort};
use std::collections::HashMap;

// ── MockEnv ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockEnv {
    pub vars: HashMap<String, String>,
    pub args: Vec<String>,
}

#[allow(dead_code)]
impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| (*a).to_string()).collect();
        self
    }
}

impl EnvPort for MockEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn args(&self) -> Vec<String> {
        self.args.clone()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(AppEvent::name).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockProcess ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockProcess {
    pub exit_codes: Vec<i32>,
}

#[allow(dead_code)]
impl MockProcess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exited(&self) -> bool {
        !self.exit_codes.is_empty()
    }
}

impl ProcessPort for MockProcess {
    fn exit(&mut self, code: i32) {
        self.exit_codes.push(code);
    }
}
