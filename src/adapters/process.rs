//! Process-control adapter.
//!
//! Implements [`ProcessPort`] with `std::process::exit`, flushing the
//! logger first so the final lines are not lost.

use log::info;

use crate::app::ports::ProcessPort;

#[derive(Debug, Default)]
pub struct StdProcess;

impl StdProcess {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessPort for StdProcess {
    fn exit(&mut self, code: i32) {
        info!("Exiting with code {}", code);
        log::logger().flush();
        std::process::exit(code);
    }
}
