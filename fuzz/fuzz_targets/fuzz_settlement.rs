//! Fuzz target: callback settlement
//!
//! Interprets the input as a script of callback invocations spread across
//! several cloned handles, polling the deferred between steps, and checks:
//! - No panics under arbitrary byte inputs
//! - Exactly one invocation reports that it settled the deferred
//! - The deferred yields the outcome of that first invocation
//!
//! cargo fuzz run fuzz_settlement

#![no_main]

use futures_lite::future::{block_on, poll_once};
use libfuzzer_sys::fuzz_target;

use errback::{Errback, channel};

const HANDLES: usize = 4;

fuzz_target!(|data: &[u8]| {
    let (cb, mut deferred) = channel::<u8, u8>();
    let handles: Vec<Errback<u8, u8>> = (0..HANDLES).map(|_| cb.clone()).collect();
    drop(cb);

    let mut first: Option<Result<u8, u8>> = None;
    let mut wins = 0usize;

    for pair in data.chunks_exact(2) {
        let (op, value) = (pair[0], pair[1]);
        let handle = &handles[usize::from(op >> 4) % HANDLES];
        let (won, outcome) = match op & 0x3 {
            0 => (handle.succeed(value), Ok(value)),
            1 => (handle.fail(value), Err(value)),
            2 => (handle.call(None, value), Ok(value)),
            _ => (handle.call(Some(value), 0), Err(value)),
        };
        if won {
            wins += 1;
            first = Some(outcome);
        }
        assert_eq!(handle.is_settled(), first.is_some());

        if op & 0x8 != 0 && first.is_none() {
            assert!(block_on(poll_once(&mut deferred)).is_none());
        }
    }

    assert!(wins <= 1);
    if let Some(expected) = first {
        assert!(deferred.is_settled());
        assert_eq!(block_on(deferred), expected);
    } else {
        assert!(!deferred.is_settled());
    }
});
