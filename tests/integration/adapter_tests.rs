//! Integration tests: promisify → Deferred against timer-driven collaborators.

use core::time::Duration;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use errback::adapters::timer::{ManualTimer, ThreadTimer};
use errback::app::catalog::{LookupError, USER_NOT_FOUND, User, user_directory};
use errback::app::ports::TimerPort;
use errback::{Errback, promisify, try_promisify};
use futures_lite::future::{block_on, poll_once, zip};

fn teddy() -> User {
    User {
        nickname: "Teddy".into(),
    }
}

#[test]
fn get_user_scenario() {
    let timer = ManualTimer::new();
    let users = user_directory(timer.clone(), Duration::from_millis(1000));
    let get_user_promise =
        try_promisify(|id: u32, cb: Errback<User, LookupError>| users.lookup(id, cb));

    let found = get_user_promise.try_call(5).unwrap();
    let missing = get_user_promise.try_call(1).unwrap();
    assert_eq!(timer.fire_all(), 2);

    assert_eq!(block_on(found), Ok(teddy()));
    assert_eq!(block_on(missing).unwrap_err().message(), USER_NOT_FOUND);
}

#[test]
fn reverse_completion_keeps_outcomes_matched() {
    let timer = ManualTimer::new();
    let users = user_directory(timer.clone(), Duration::ZERO);
    let get_user = try_promisify(|id: u32, cb: Errback<User, LookupError>| users.lookup(id, cb));

    let first = get_user.try_call(1).unwrap();
    let second = get_user.try_call(5).unwrap();

    // Second call's callback fires before the first's.
    assert!(timer.fire_nth(1));
    assert!(second.is_settled());
    assert!(!first.is_settled());
    assert!(timer.fire_nth(0));

    assert!(block_on(first).is_err());
    assert_eq!(block_on(second), Ok(teddy()));
}

#[test]
fn double_callback_only_first_observable() {
    let timer = ManualTimer::new();
    let flaky = promisify(|n: u32, cb: Errback<u32, String>| {
        let again = cb.clone();
        timer
            .set_timeout(Duration::ZERO, Box::new(move || {
                cb.succeed(n);
            }))
            .unwrap();
        timer
            .set_timeout(Duration::ZERO, Box::new(move || {
                again.fail("late failure".into());
            }))
            .unwrap();
    });

    let deferred = flaky.call(3);
    timer.fire_all();
    assert_eq!(block_on(deferred), Ok(3));
}

#[test]
fn chaining_with_error_recovery() {
    let timer = ManualTimer::new();
    let users = user_directory(timer.clone(), Duration::ZERO);
    let get_user = try_promisify(|id: u32, cb: Errback<User, LookupError>| users.lookup(id, cb));

    let recovered = {
        let deferred = get_user.try_call(1).unwrap();
        async move {
            deferred
                .await
                .map(|u| u.nickname)
                .or_else(|e| Ok::<_, LookupError>(format!("guest ({e})")))
        }
    };
    timer.fire_all();
    assert_eq!(block_on(recovered), Ok("guest (User not found)".to_string()));
}

#[test]
fn no_settlement_before_callback() {
    let timer = ManualTimer::new();
    let users = user_directory(timer.clone(), Duration::from_millis(5));
    let get_user = try_promisify(|id: u32, cb: Errback<User, LookupError>| users.lookup(id, cb));

    let mut deferred = get_user.try_call(5).unwrap();
    for _ in 0..3 {
        assert!(block_on(poll_once(&mut deferred)).is_none());
    }
    timer.fire_all();
    assert_eq!(block_on(poll_once(&mut deferred)), Some(Ok(teddy())));
}

#[test]
fn wrapped_function_invoked_once_per_call() {
    let calls = AtomicUsize::new(0);
    let adapted = promisify(|(): (), cb: Errback<(), ()>| {
        calls.fetch_add(1, Ordering::SeqCst);
        cb.succeed(());
    });
    let a = adapted.call(());
    let b = adapted.call(());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(block_on(zip(a, b)), (Ok(()), Ok(())));
}

#[test]
fn thread_timer_concurrent_lookups() {
    let timer = Arc::new(ThreadTimer::new());
    let users = user_directory(Arc::clone(&timer), Duration::from_millis(30));
    let get_user = try_promisify(|id: u32, cb: Errback<User, LookupError>| users.lookup(id, cb));

    let slow_ok = get_user.try_call(5).unwrap();
    let failing = get_user.try_call(2).unwrap();
    let (ok, err) = block_on(zip(slow_ok, failing));
    assert_eq!(ok, Ok(teddy()));
    assert_eq!(err.unwrap_err().message(), USER_NOT_FOUND);
}
