//! Callback-to-future adapter.
//!
//! [`promisify`] turns a function whose last parameter is an error-first
//! [`Errback`] into a [`Promisified`] whose `call` returns a [`Deferred`].
//! Leading parameters are passed as one value `A` (use a tuple for several).
//!
//! ```text
//!   f(args, cb)            f'(args) ──▶ Deferred<T, E>
//!        ▲                     │
//!        └──── invoked once ───┘  (synchronously, before call returns)
//! ```
//!
//! The adapter schedules nothing, logs nothing, and never retries.  Panics
//! raised by `f` unwind to the caller of `call`.  For functions whose setup
//! can fail, [`try_promisify`] keeps that failure synchronous
//! (`Result<Deferred, S>`) so it never mixes with the operation's error.

use core::marker::PhantomData;

use crate::deferred::{self, Deferred};
use crate::errback::Errback;

/// An error-first function adapted to return [`Deferred`] results.
///
/// Holds only the wrapped function; each call creates an independent
/// settlement slot.
pub struct Promisified<F, A, T, E> {
    f: F,
    _sig: PhantomData<fn(A) -> (T, E)>,
}

/// Adapt `f(args, cb)` into `f'(args) -> Deferred<T, E>`.
pub fn promisify<F, A, T, E>(f: F) -> Promisified<F, A, T, E>
where
    F: Fn(A, Errback<T, E>),
{
    Promisified {
        f,
        _sig: PhantomData,
    }
}

/// Adapt a function whose setup is fallible: `f(args, cb) -> Result<(), S>`.
pub fn try_promisify<F, A, T, E, S>(f: F) -> Promisified<F, A, T, E>
where
    F: Fn(A, Errback<T, E>) -> Result<(), S>,
{
    Promisified {
        f,
        _sig: PhantomData,
    }
}

impl<F, A, T, E> Promisified<F, A, T, E>
where
    F: Fn(A, Errback<T, E>),
{
    /// Invoke the wrapped function once and return its deferred result.
    pub fn call(&self, args: A) -> Deferred<T, E> {
        let (cb, deferred) = deferred::channel();
        (self.f)(args, cb);
        deferred
    }
}

impl<F, A, T, E, S> Promisified<F, A, T, E>
where
    F: Fn(A, Errback<T, E>) -> Result<(), S>,
{
    /// Invoke the wrapped function once.
    ///
    /// `Err(s)` means the operation never started; the deferred is
    /// discarded and any callback the function still fires is ignored.
    pub fn try_call(&self, args: A) -> Result<Deferred<T, E>, S> {
        let (cb, deferred) = deferred::channel();
        (self.f)(args, cb)?;
        Ok(deferred)
    }
}

impl<F, A, T, E> Clone for Promisified<F, A, T, E>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _sig: PhantomData,
        }
    }
}
