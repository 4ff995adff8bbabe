//! Error-first lookup collaborators.
//!
//! A [`Catalog`] answers a key lookup through an [`Errback`] after a fixed
//! delay on a [`TimerPort`], the shape of a simulated database call:
//!
//! ```text
//!   lookup(key, cb) ──set_timeout(delay)──▶ … ──▶ cb(None, value)
//!                                               └▶ cb(Some(not found))
//! ```
//!
//! Two stock catalogs are provided: [`user_directory`] and
//! [`trail_registry`].

use std::collections::BTreeMap;
use std::sync::Arc;
use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use super::ports::{TimerError, TimerPort};
use crate::errback::Errback;

/// Failure message for an unknown user id.
pub const USER_NOT_FOUND: &str = "User not found";
/// Failure message for an unknown trail name.
pub const TRAIL_NOT_FOUND: &str = "Trail not found!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trail {
    pub nickname: String,
    pub miles: u32,
}

/// The error value a catalog calls back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LookupError {}

// ── Catalog ──────────────────────────────────────────────────

/// Read-only map queried through error-first callbacks.
pub struct Catalog<K, V, P> {
    entries: Arc<BTreeMap<K, V>>,
    timer: P,
    delay: Duration,
    not_found: &'static str,
}

pub type UserDirectory<P> = Catalog<u32, User, P>;
pub type TrailRegistry<P> = Catalog<String, Trail, P>;

impl<K, V, P> Catalog<K, V, P>
where
    K: Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    P: TimerPort,
{
    pub fn new(
        entries: BTreeMap<K, V>,
        timer: P,
        delay: Duration,
        not_found: &'static str,
    ) -> Self {
        Self {
            entries: Arc::new(entries),
            timer,
            delay,
            not_found,
        }
    }

    /// Schedule the lookup; `cb` fires once `delay` has elapsed.
    ///
    /// `Err` means the timer refused the work and `cb` will never fire.
    pub fn lookup(&self, key: K, cb: Errback<V, LookupError>) -> Result<(), TimerError> {
        let entries = Arc::clone(&self.entries);
        let not_found = self.not_found;
        self.timer.set_timeout(
            self.delay,
            Box::new(move || match entries.get(&key) {
                Some(value) => {
                    cb.call(None, value.clone());
                }
                None => {
                    cb.fail(LookupError::new(not_found));
                }
            }),
        )
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// User directory with the single known user, id `5` ("Teddy").
pub fn user_directory<P: TimerPort>(timer: P, delay: Duration) -> UserDirectory<P> {
    let mut users = BTreeMap::new();
    users.insert(
        5,
        User {
            nickname: "Teddy".into(),
        },
    );
    Catalog::new(users, timer, delay, USER_NOT_FOUND)
}

/// Trail registry keyed by trail name.
pub fn trail_registry<P: TimerPort>(timer: P, delay: Duration) -> TrailRegistry<P> {
    let trails = [
        ("North Country", "NCT", 4800),
        ("Appalachian", "AT", 2190),
        ("Pacific Crest", "PCT", 2650),
        ("Continental Divide", "CDT", 3100),
    ]
    .into_iter()
    .map(|(name, nickname, miles)| {
        (
            name.to_string(),
            Trail {
                nickname: nickname.to_string(),
                miles,
            },
        )
    })
    .collect();
    Catalog::new(trails, timer, delay, TRAIL_NOT_FOUND)
}
