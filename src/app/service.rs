//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the two catalogs and the timeout policy.  Lookups go
//! through the callback-to-future adapter; reporting goes through the
//! [`EventSink`] and [`ProcessPort`] ports, so the whole service runs
//! against mock adapters in tests.
//!
//! ```text
//!   TimerPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//!     EnvPort ──▶ │  catalogs · promisify ·  │ ──▶ ProcessPort
//!                 │  timeout policy          │
//!                 └──────────────────────────┘
//! ```

use core::time::Duration;

use edge_executor::LocalExecutor;
use futures_lite::future::block_on;
use log::{debug, info, warn};

use crate::adapter::{Promisified, try_promisify};
use crate::config::AppConfig;
use crate::deferred::Deferred;
use crate::errback::Errback;
use crate::error::{Error, Result};
use crate::timeout::with_timeout;

use super::catalog::{Catalog, LookupError, Trail, User, trail_registry, user_directory};
use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EnvPort, EventSink, ProcessPort, TimerError, TimerPort};

/// Value of the environment variable that switches on development mode.
pub const DEVELOPMENT: &str = "development";

/// Queue capacity of the executor behind [`AppService::run_all`], and so
/// the number of lookups it keeps in flight at once.
pub const MAX_IN_FLIGHT: usize = 64;

type LookupFn<K, V> =
    Box<dyn Fn(K, Errback<V, LookupError>) -> core::result::Result<(), TimerError>>;

/// A catalog's `lookup` adapted once into a deferred-returning function.
type Lookup<K, V> = Promisified<LookupFn<K, V>, K, V, LookupError>;

fn adapt<K, V, P>(catalog: Catalog<K, V, P>) -> Lookup<K, V>
where
    K: Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    P: TimerPort + 'static,
{
    let lookup: LookupFn<K, V> = Box::new(move |key, cb| catalog.lookup(key, cb));
    try_promisify(lookup)
}

/// Result of running one [`AppCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    User { id: u32, result: Result<User> },
    Trail { name: String, result: Result<Trail> },
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        match self {
            Self::User { result, .. } => result.is_ok(),
            Self::Trail { result, .. } => result.is_ok(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<P> {
    get_user: Lookup<u32, User>,
    get_trail_distance: Lookup<String, Trail>,
    timer: P,
    timeout: Option<Duration>,
    development: bool,
}

impl<P: TimerPort + Clone + 'static> AppService<P> {
    /// Build the service.  Development mode is on when the environment
    /// variable named by `config.env_var` equals `"development"`.
    pub fn new(config: &AppConfig, env: &impl EnvPort, timer: P) -> Self {
        let delay = config.lookup_delay();
        let development = env.var(&config.env_var).as_deref() == Some(DEVELOPMENT);
        Self {
            get_user: adapt(user_directory(timer.clone(), delay)),
            get_trail_distance: adapt(trail_registry(timer.clone(), delay)),
            timer,
            timeout: config.lookup_timeout(),
            development,
        }
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Emit the start event.
    pub fn announce(&self, sink: &mut impl EventSink) {
        if self.development {
            info!("Testing! Testing! Does everything work?");
        }
        sink.emit(&AppEvent::Started {
            development: self.development,
        });
    }

    // ── Lookups ───────────────────────────────────────────────

    pub async fn find_user(&self, id: u32) -> Result<User> {
        let deferred = self.get_user.try_call(id)?;
        self.settle(deferred).await
    }

    pub async fn find_trail(&self, name: &str) -> Result<Trail> {
        let deferred = self.get_trail_distance.try_call(name.to_string())?;
        self.settle(deferred).await
    }

    /// Run one command to completion.
    pub async fn run(&self, cmd: AppCommand) -> Outcome {
        match cmd {
            AppCommand::FindUser(id) => Outcome::User {
                id,
                result: self.find_user(id).await,
            },
            AppCommand::FindTrail(name) => {
                let result = self.find_trail(&name).await;
                Outcome::Trail { name, result }
            }
        }
    }

    /// Run every command and return the outcomes in command order.
    ///
    /// Lookups run concurrently in batches of at most [`MAX_IN_FLIGHT`].
    /// Blocks the calling thread, so the timer must fire from another
    /// thread (a `ThreadTimer`, not a `ManualTimer`).
    pub fn run_all(&self, commands: Vec<AppCommand>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(commands.len());
        let mut commands = commands.into_iter().peekable();
        while commands.peek().is_some() {
            let executor: LocalExecutor<'_, MAX_IN_FLIGHT> = LocalExecutor::new();
            let tasks: Vec<_> = commands
                .by_ref()
                .take(MAX_IN_FLIGHT)
                .map(|cmd| executor.spawn(self.run(cmd)))
                .collect();
            debug!("Running batch of {} lookup(s)", tasks.len());
            let batch = block_on(executor.run(async {
                let mut batch = Vec::with_capacity(tasks.len());
                for task in tasks {
                    batch.push(task.await);
                }
                batch
            }));
            outcomes.extend(batch);
        }
        outcomes
    }

    async fn settle<V>(&self, deferred: Deferred<V, LookupError>) -> Result<V> {
        match self.timeout {
            None => Ok(deferred.await?),
            Some(after) => Ok(with_timeout(deferred, &self.timer, after)?.await??),
        }
    }

    // ── Reporting ─────────────────────────────────────────────

    /// Emit the outcome.  A failure is fatal: it emits `LookupFailed` and
    /// `Exiting`, then asks `process` to exit.  Returns `true` on success.
    pub fn report(
        &self,
        outcome: Outcome,
        sink: &mut impl EventSink,
        process: &mut impl ProcessPort,
    ) -> bool {
        match outcome {
            Outcome::User { id, result: Ok(user) } => {
                info!("User found! Their nickname is: {}", user.nickname);
                sink.emit(&AppEvent::UserFound { id, user });
                true
            }
            Outcome::Trail {
                name,
                result: Ok(trail),
            } => {
                info!("The {} is {} miles long!", trail.nickname, trail.miles);
                sink.emit(&AppEvent::TrailFound { name, trail });
                true
            }
            Outcome::User { id, result: Err(e) } => {
                self.fail(format!("user {id}"), &e, sink, process);
                false
            }
            Outcome::Trail { name, result: Err(e) } => {
                self.fail(format!("trail {name}"), &e, sink, process);
                false
            }
        }
    }

    fn fail(
        &self,
        subject: String,
        err: &Error,
        sink: &mut impl EventSink,
        process: &mut impl ProcessPort,
    ) {
        let reason = match err {
            Error::Lookup(e) => e.message().to_string(),
            other => other.to_string(),
        };
        warn!("{subject}: {reason}");
        sink.emit(&AppEvent::LookupFailed { subject, reason });

        let code = err.exit_code();
        sink.emit(&AppEvent::Exiting(code));
        process.exit(code);
    }
}
