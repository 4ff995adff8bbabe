//! Deferred results and their one-time settlement slot.
//!
//! ```text
//!   Errback (clonable) ──settle──▶ ┌──────────────┐ ◀──poll── Deferred
//!   Errback (clone)    ──settle──▶ │  Slot<T, E>  │
//!                                  │ Pending      │
//!                                  │ Settled(r)   │
//!                                  │ Taken        │
//!                                  └──────────────┘
//! ```
//!
//! One slot exists per invocation.  The first `settle` moves the slot from
//! `Pending` to `Settled`; every later `settle` is a no-op.  The slot is
//! guarded by an `embassy-sync` blocking mutex so callbacks may fire from
//! any thread, and the waiting task is woken through an [`AtomicWaker`].

use core::cell::RefCell;
use core::future::Future;
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::waitqueue::AtomicWaker;

use crate::errback::Errback;

/// Create a connected callback / deferred pair.
///
/// The [`Errback`] half is handed to the error-first function; the
/// [`Deferred`] half is returned to the caller.  This is the primitive that
/// [`promisify`](crate::adapter::promisify) builds on.
pub fn channel<T, E>() -> (Errback<T, E>, Deferred<T, E>) {
    let slot = Arc::new(Slot::new());
    (Errback::new(Arc::clone(&slot)), Deferred { slot })
}

// ── Settlement slot ──────────────────────────────────────────

enum Settlement<T, E> {
    Pending,
    Settled(Result<T, E>),
    /// The outcome was handed to the awaiting task.
    Taken,
}

pub(crate) struct Slot<T, E> {
    state: Mutex<CriticalSectionRawMutex, RefCell<Settlement<T, E>>>,
    waker: AtomicWaker,
}

impl<T, E> Slot<T, E> {
    fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(Settlement::Pending)),
            waker: AtomicWaker::new(),
        }
    }

    /// Store `outcome` if nothing has been stored yet.  Returns `true` for
    /// the call that settled the slot.
    pub(crate) fn settle(&self, outcome: Result<T, E>) -> bool {
        let won = self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            if matches!(*state, Settlement::Pending) {
                *state = Settlement::Settled(outcome);
                true
            } else {
                false
            }
        });
        if won {
            self.waker.wake();
        }
        won
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.state
            .lock(|cell| !matches!(*cell.borrow(), Settlement::Pending))
    }

    fn poll_take(&self, cx: &mut Context<'_>) -> Poll<Result<T, E>> {
        // Register first so a settle racing with this poll still wakes us.
        self.waker.register(cx.waker());
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            match mem::replace(&mut *state, Settlement::Taken) {
                Settlement::Settled(outcome) => Poll::Ready(outcome),
                other => {
                    *state = other;
                    Poll::Pending
                }
            }
        })
    }
}

// ── Deferred ─────────────────────────────────────────────────

/// A value or failure that becomes available once its [`Errback`] fires.
///
/// `Deferred` is a plain [`Future`] yielding `Result<T, E>`, so it chains
/// with `.await`, `?`, the `Result` combinators, and any executor.  It
/// never settles on its own: if no callback fires it stays pending.
/// Polling again after it has yielded returns `Poll::Pending`.
#[must_use = "a deferred result does nothing unless awaited"]
pub struct Deferred<T, E> {
    slot: Arc<Slot<T, E>>,
}

impl<T, E> Deferred<T, E> {
    /// `true` once the callback has fired, whether or not the outcome
    /// has been consumed yet.
    pub fn is_settled(&self) -> bool {
        self.slot.is_settled()
    }

    /// Block the current thread until the deferred settles.
    ///
    /// The callback must fire from another thread (or from work already
    /// scheduled elsewhere); firing it from this thread after `wait` is
    /// entered is impossible and the call would never return.
    pub fn wait(self) -> Result<T, E> {
        futures_lite::future::block_on(self)
    }
}

impl<T, E> Future for Deferred<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.slot.poll_take(cx)
    }
}

impl<T, E> core::fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}
