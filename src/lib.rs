//! Error-first callback bridging.
//!
//! Turns functions that report completion through an `(error, result)`
//! callback into functions returning a [`Deferred`] future:
//!
//! ```text
//!   f(args, Errback) ──promisify──▶ f'(args) -> Deferred<T, E>
//! ```
//!
//! The [`app`] layer shows the adapter in use: simulated lookups driven by
//! an injected timer, reported through event-sink and process ports.

#![deny(unused_must_use)]

pub mod adapter;
pub mod adapters;
pub mod app;
pub mod config;
pub mod deferred;
pub mod emitter;
pub mod errback;
pub mod timeout;

mod error;

pub use adapter::{Promisified, promisify, try_promisify};
pub use deferred::{Deferred, channel};
pub use errback::Errback;
pub use error::{Error, Result};
