//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no real timers
//! or process control involved.

mod adapter_tests;
mod mock_ports;
mod service_tests;
