// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Display;
use std::thread;
use std::time::{Duration, Instant};

use tracing::Level;

/// The error returned by [`retry`] and [`retry_during`].
///
/// Bounded retries report plain text. The last failure is rendered into the error and is not
/// kept as a chain, so it carries no cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BoundedRetryError {
    /// [`retry`] used up all of its attempts.
    #[error("after {attempts} attempt(s), last error: {last_error}")]
    AttemptsExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Text of the last failure.
        last_error: String,
    },

    /// [`retry_during`] ran past its time budget.
    #[error("after {attempts} attempts (during {elapsed:?}), last error: {last_error}")]
    DeadlineExceeded {
        /// Number of attempts made.
        attempts: u32,
        /// Time elapsed between the first attempt and the last failure.
        elapsed: Duration,
        /// Text of the last failure.
        last_error: String,
    },
}

impl BoundedRetryError {
    /// Returns the number of attempts made.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::AttemptsExhausted { attempts, .. } | Self::DeadlineExceeded { attempts, .. } => *attempts,
        }
    }

    /// Returns the text of the last failure.
    #[must_use]
    pub fn last_error(&self) -> &str {
        match self {
            Self::AttemptsExhausted { last_error, .. } | Self::DeadlineExceeded { last_error, .. } => last_error,
        }
    }
}

/// Calls `operation` up to `attempts` times, sleeping for `sleep` between failures.
///
/// At least one attempt is always made, even if `attempts` is `0`. Every failure except the
/// last one emits a `retrier.retry` warning with the failure text.
///
/// # Errors
///
/// Returns [`BoundedRetryError::AttemptsExhausted`] with the text of the last failure when
/// every attempt fails.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// let error = retrier::retry(3, Duration::ZERO, || Err::<(), _>("connection refused")).unwrap_err();
///
/// assert_eq!(error.to_string(), "after 3 attempt(s), last error: connection refused");
/// ```
#[cfg_attr(test, mutants::skip)] // Mutating the loop exit conditions can hang the tests.
pub fn retry<T, E, F>(attempts: u32, sleep: Duration, mut operation: F) -> Result<T, BoundedRetryError>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let attempts = attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let error = match operation() {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if attempt >= attempts {
            return Err(BoundedRetryError::AttemptsExhausted {
                attempts: attempt,
                last_error: error.to_string(),
            });
        }

        pause(sleep);
        log_retry(attempt, &error);
    }
}

/// Calls `operation` until it succeeds or more than `duration` has elapsed since the first
/// attempt, sleeping for `sleep` between failures.
///
/// The elapsed time is checked after each failure, so at least one attempt is always made
/// and the last attempt may end well after `duration`. Every failure that is followed by
/// another attempt emits a `retrier.retry` warning with the failure text.
///
/// # Errors
///
/// Returns [`BoundedRetryError::DeadlineExceeded`] with the attempt count, the elapsed time
/// and the text of the last failure once the time budget is exceeded.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let value = retrier::retry_during(Duration::from_secs(1), Duration::from_millis(1), || {
///     calls += 1;
///     if calls < 3 { Err("warming up") } else { Ok(calls) }
/// })
/// .unwrap();
///
/// assert_eq!(value, 3);
/// ```
#[cfg_attr(test, mutants::skip)] // Mutating the loop exit conditions can hang the tests.
pub fn retry_during<T, E, F>(duration: Duration, sleep: Duration, mut operation: F) -> Result<T, BoundedRetryError>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt = attempt.saturating_add(1);
        let error = match operation() {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let elapsed = started.elapsed();
        if elapsed > duration {
            return Err(BoundedRetryError::DeadlineExceeded {
                attempts: attempt,
                elapsed,
                last_error: error.to_string(),
            });
        }

        pause(sleep);
        log_retry(attempt, &error);
    }
}

fn pause(sleep: Duration) {
    if !sleep.is_zero() {
        thread::sleep(sleep);
    }
}

fn log_retry(attempt: u32, error: &impl Display) {
    tracing::event!(
        name: "retrier.retry",
        Level::WARN,
        attempt,
        error = %error,
        "retrying after error",
    );
}
