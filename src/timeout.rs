//! Opt-in timeout policy for deferred results.
//!
//! The adapter itself never imposes a deadline.  Callers that want one race
//! the deferred against a sleep armed on an injected [`TimerPort`]; the
//! sleep is itself the timer's `set_timeout` run through
//! [`try_promisify`].

use core::convert::Infallible;
use core::fmt;
use core::future::Future;
use core::time::Duration;

use futures_lite::future;

use crate::adapter::try_promisify;
use crate::app::ports::{TimerError, TimerPort};
use crate::deferred::Deferred;
use crate::errback::Errback;

/// The deadline passed before the deferred settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deadline elapsed before settlement")
    }
}

impl std::error::Error for TimedOut {}

/// A deferred that succeeds once `after` has elapsed on `timer`.
pub fn sleep<P>(timer: &P, after: Duration) -> Result<Deferred<(), Infallible>, TimerError>
where
    P: TimerPort + ?Sized,
{
    let set_timeout = try_promisify(|delay: Duration, cb: Errback<(), Infallible>| {
        timer.set_timeout(
            delay,
            Box::new(move || {
                cb.succeed(());
            }),
        )
    });
    set_timeout.try_call(after)
}

/// Race `deferred` against a sleep of `after`.
///
/// Resolves to `Ok(outcome)` when the deferred settles first and
/// `Err(TimedOut)` otherwise.  If both are ready on the same poll the
/// deferred's outcome wins.  Fails synchronously when the timer cannot be
/// armed.
pub fn with_timeout<T, E, P>(
    deferred: Deferred<T, E>,
    timer: &P,
    after: Duration,
) -> Result<impl Future<Output = Result<Result<T, E>, TimedOut>> + use<T, E, P>, TimerError>
where
    P: TimerPort + ?Sized,
{
    let alarm = sleep(timer, after)?;
    Ok(future::or(async move { Ok(deferred.await) }, async move {
        let _ = alarm.await;
        Err(TimedOut)
    }))
}
