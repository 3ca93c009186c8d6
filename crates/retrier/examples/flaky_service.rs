// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Retries a flaky call with a retry policy, then with the bounded helpers.

use std::io::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use errchain::{ChainError, ResultExt};
use retrier::RetryPolicy;
use tracing::Level;

static CALLS: AtomicU32 = AtomicU32::new(0);

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let policy = RetryPolicy::new()
        .max_tries(5)
        .sleep(Duration::from_millis(50))
        .after_retry(|error| {
            if let Some(error) = error {
                println!("attempt failed: {error}");
            }
        });

    match policy.execute(fetch_profile) {
        Ok(profile) => println!("execution succeeded, result: {profile}"),
        Err(error) => println!("execution failed, details: {}", error.details()),
    }

    let bounded = retrier::retry(2, Duration::from_millis(10), || Err::<(), _>(Error::other("still down")));
    if let Err(error) = bounded {
        println!("bounded retry failed: {error}");
    }
}

// fails on the first two calls
fn fetch_profile() -> Result<String, ChainError> {
    let call = CALLS.fetch_add(1, Ordering::Relaxed) + 1;
    if call < 3 {
        Err(Error::other("connection reset")).note_err(format!("GET /profile (call {call})"))
    } else {
        Ok("alice".to_string())
    }
}
