// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unpublished crate containing testing utilities for use within this repo.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;
use std::{env, thread};

mod log;

pub use log::*;

/// If something (whatever) does not happen in a test within this time, the test will fail.
///
/// We are conservative here and allow much time - this is only to break out of infinite loops, not for any
/// situations that are actually expected.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

#[must_use]
pub fn is_mutation_testing() -> bool {
    env::var("MUTATION_TESTING").as_deref() == Ok("1")
}

/// Executes a thread-safe function on a background thread and abandons it if
/// it does not complete before the provided timeout.
///
/// Returns `None` if the function panics or does not finish within [`TEST_TIMEOUT`].
#[cfg_attr(test, mutants::skip)] // This is test logic - pointless to mutate.
#[must_use]
pub fn execute_or_abandon<F, R>(f: F) -> Option<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if is_mutation_testing() {
        // Test timeouts are disabled under mutation testing - we want them to result in
        // actual "timeout" mutation test results.
        return Some(f());
    }

    let (sender, receiver) = mpsc::channel();

    // A panic or a hang both leave the channel without a result.
    thread::spawn(move || {
        let result = f();
        sender.send(result).unwrap();
    });

    receiver.recv_timeout(TEST_TIMEOUT).ok()
}

/// Counts calls across clones, for observing how often retry loops and hooks run.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one call and returns the total number of calls so far.
    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the number of recorded calls.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

/// Creates an operation that fails `failures` times and succeeds with `value` afterwards.
///
/// The error of each failed call is created by `error` from the 1-based call number. The
/// returned counter tracks every call of the operation.
pub fn fail_times<T, E>(
    failures: usize,
    value: T,
    error: impl Fn(usize) -> E,
) -> (CallCounter, impl FnMut() -> Result<T, E>)
where
    T: Clone,
{
    let counter = CallCounter::new();
    let calls = counter.clone();

    let operation = move || {
        let call = calls.increment();
        if call <= failures { Err(error(call)) } else { Ok(value.clone()) }
    };

    (counter, operation)
}
