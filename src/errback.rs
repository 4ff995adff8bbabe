//! Error-first callback handle.
//!
//! An [`Errback`] is what an error-first function receives as its last
//! argument.  Calling it follows the `(error, result)` convention:
//!
//! | Call                         | Deferred settles to |
//! |------------------------------|---------------------|
//! | `call(None, v)`              | `Ok(v)`             |
//! | `call(Some(e), _)`           | `Err(e)`            |
//! | `fail(e)`                    | `Err(e)`            |
//! | `succeed(v)`                 | `Ok(v)`             |
//!
//! The handle is `Clone` and every method takes `&self`, so a function is
//! free to call it more than once.  Only the first call across all clones
//! is observable; the rest return `false` and have no other effect.

use std::sync::Arc;

use crate::deferred::Slot;

/// Error-first callback bound to exactly one [`Deferred`](crate::Deferred).
pub struct Errback<T, E> {
    slot: Arc<Slot<T, E>>,
}

impl<T, E> Errback<T, E> {
    pub(crate) fn new(slot: Arc<Slot<T, E>>) -> Self {
        Self { slot }
    }

    /// Invoke with the error-first argument pair.
    ///
    /// A `Some` error wins and `value` is dropped unobserved.  Returns
    /// `true` if this call settled the deferred.
    pub fn call(&self, err: Option<E>, value: T) -> bool {
        match err {
            Some(e) => self.slot.settle(Err(e)),
            None => self.slot.settle(Ok(value)),
        }
    }

    /// One-argument failure form: `callback(error)`.
    pub fn fail(&self, err: E) -> bool {
        self.slot.settle(Err(err))
    }

    /// `callback(null, value)`.
    pub fn succeed(&self, value: T) -> bool {
        self.slot.settle(Ok(value))
    }

    /// Settle from an already-built `Result`.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        self.slot.settle(outcome)
    }

    /// `true` once any clone of this callback has fired.
    pub fn is_settled(&self) -> bool {
        self.slot.is_settled()
    }
}

impl<T, E> Clone for Errback<T, E> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T, E> core::fmt::Debug for Errback<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Errback")
            .field("settled", &self.is_settled())
            .finish()
    }
}
