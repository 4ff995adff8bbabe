//! Application core — the lookup scenario, expressed through ports.
//!
//! This module holds the error-first collaborators ([`catalog`]) and the
//! service that drives them through the callback-to-future adapter.  All
//! interaction with the platform happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real timers,
//! environment, or process control.

pub mod catalog;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
