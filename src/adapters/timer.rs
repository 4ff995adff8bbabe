//! Timer adapters.
//!
//! Implements [`TimerPort`] two ways:
//!
//! - [`ThreadTimer`]: one short-lived named thread per timeout; the task
//!   runs on that thread once the delay has elapsed.  Used by the binary.
//! - [`ManualTimer`]: queues tasks and runs them only when told to, on the
//!   calling thread.  Lets tests choose completion order deterministically.

use core::cell::RefCell;
use core::time::Duration;
use std::sync::Arc;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{debug, warn};

use crate::app::ports::{TimerError, TimerPort, TimerTask};

const DEFAULT_STACK_KB: usize = 64;

// ── ThreadTimer ──────────────────────────────────────────────

/// Thread-per-timeout timer.
#[derive(Debug, Clone)]
pub struct ThreadTimer {
    stack_kb: usize,
}

impl Default for ThreadTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadTimer {
    pub fn new() -> Self {
        Self {
            stack_kb: DEFAULT_STACK_KB,
        }
    }
}

impl TimerPort for ThreadTimer {
    fn set_timeout(&self, delay: Duration, task: TimerTask) -> Result<(), TimerError> {
        debug!(
            "Arming timer (delay={}ms, stack={}KB)",
            delay.as_millis(),
            self.stack_kb
        );
        std::thread::Builder::new()
            .name("errback-timer".into())
            .stack_size(self.stack_kb * 1024)
            .spawn(move || {
                std::thread::sleep(delay);
                task();
            })
            .map(drop)
            .map_err(|e| {
                warn!("Timer thread spawn failed: {}", e);
                TimerError::SpawnFailed
            })
    }
}

// ── ManualTimer ──────────────────────────────────────────────

struct Scheduled {
    seq: u64,
    delay: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct Queue {
    entries: Vec<Scheduled>,
    next_seq: u64,
    shut_down: bool,
}

/// Test-driven timer: nothing runs until a `fire_*` method is called.
///
/// Clones share one queue, so a clone can be handed to the code under test
/// while the test keeps another to drive it.
#[derive(Clone)]
pub struct ManualTimer {
    queue: Arc<Mutex<CriticalSectionRawMutex, RefCell<Queue>>>,
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTimer {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(RefCell::new(Queue::default()))),
        }
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.lock(|q| q.borrow().entries.len())
    }

    /// Delays of the waiting tasks, in scheduling order.
    pub fn delays(&self) -> Vec<Duration> {
        self.queue
            .lock(|q| q.borrow().entries.iter().map(|e| e.delay).collect())
    }

    /// Fire the task with the shortest delay (earliest scheduled on ties).
    /// Returns `false` if nothing was pending.
    pub fn fire_next(&self) -> bool {
        let task = self.queue.lock(|q| {
            let mut q = q.borrow_mut();
            let index = q
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| (e.delay, e.seq))
                .map(|(i, _)| i)?;
            Some(q.entries.remove(index).task)
        });
        Self::run(task)
    }

    /// Fire the `index`-th waiting task in scheduling order.
    pub fn fire_nth(&self, index: usize) -> bool {
        let task = self.queue.lock(|q| {
            let mut q = q.borrow_mut();
            (index < q.entries.len()).then(|| q.entries.remove(index).task)
        });
        Self::run(task)
    }

    /// Fire everything in delay order, including tasks scheduled by the
    /// tasks themselves.  Returns the number fired.
    pub fn fire_all(&self) -> usize {
        let mut fired = 0;
        while self.fire_next() {
            fired += 1;
        }
        fired
    }

    /// Fire the currently waiting tasks newest-first.
    pub fn fire_all_reversed(&self) -> usize {
        let tasks: Vec<TimerTask> = self.queue.lock(|q| {
            let mut q = q.borrow_mut();
            q.entries.drain(..).rev().map(|e| e.task).collect()
        });
        let fired = tasks.len();
        for task in tasks {
            task();
        }
        fired
    }

    /// Refuse all further `set_timeout` calls and drop waiting tasks.
    pub fn shutdown(&self) {
        self.queue.lock(|q| {
            let mut q = q.borrow_mut();
            q.shut_down = true;
            q.entries.clear();
        });
    }

    // Tasks run outside the lock so they may schedule more work.
    fn run(task: Option<TimerTask>) -> bool {
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

impl TimerPort for ManualTimer {
    fn set_timeout(&self, delay: Duration, task: TimerTask) -> Result<(), TimerError> {
        self.queue.lock(|q| {
            let mut q = q.borrow_mut();
            if q.shut_down {
                return Err(TimerError::Shutdown);
            }
            let seq = q.next_seq;
            q.next_seq += 1;
            q.entries.push(Scheduled { seq, delay, task });
            Ok(())
        })
    }
}
