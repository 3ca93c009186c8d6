// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::thread;
use std::time::Instant;

use errchain::{ChainError, MAX_RETRIES_REACHED_ERROR, Matcher, TIMEOUT_ERROR};
use tracing::Level;

use crate::RetryPolicy;

impl RetryPolicy {
    /// Runs `operation` until it succeeds or the policy gives up.
    ///
    /// Each iteration performs these steps in order:
    ///
    /// 1. If the timeout has elapsed, return [`TIMEOUT_ERROR`] masked so that
    ///    [`ChainError::is_timeout`] holds for the result.
    /// 2. Call `operation`.
    /// 3. Call the [`after_retry`](Self::after_retry) hook with the failure, or `None` on
    ///    success.
    /// 4. Return the value on success.
    /// 5. If the [`checker`](Self::checker) rejects the failure, return it masked with
    ///    [`Matcher::Any`], so its cause is preserved.
    /// 6. If this was the last allowed attempt, call the
    ///    [`after_retry_limit`](Self::after_retry_limit) hook and return the failure wrapped
    ///    with the cause [`MAX_RETRIES_REACHED_ERROR`] and the message
    ///    `retry limit reached (<attempts>/<max_tries>)`.
    /// 7. Sleep for the configured delay and start over.
    ///
    /// The calling thread is blocked while sleeping. The timeout is only checked before each
    /// attempt, so a running attempt is never interrupted.
    ///
    /// # Errors
    ///
    /// Returns the last failure of `operation`, wrapped and classified as described above,
    /// or a timeout error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errchain::ChainError;
    /// use retrier::RetryPolicy;
    ///
    /// let mut attempts = 0;
    /// let value = RetryPolicy::new()
    ///     .execute(|| {
    ///         attempts += 1;
    ///         if attempts < 3 { Err(ChainError::new("not yet")) } else { Ok(attempts) }
    ///     })
    ///     .unwrap();
    /// assert_eq!(value, 3);
    ///
    /// let error = RetryPolicy::new()
    ///     .max_tries(2)
    ///     .execute(|| Err::<(), _>(std::io::Error::other("unreachable host")))
    ///     .unwrap_err();
    /// assert!(error.is_max_retries_reached());
    /// assert_eq!(error.to_string(), "retry limit reached (2/2): unreachable host");
    /// ```
    #[track_caller]
    #[cfg_attr(test, mutants::skip)] // Mutating the loop exit conditions can hang the tests.
    pub fn execute<T, E, F>(&self, mut operation: F) -> Result<T, ChainError>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<ChainError>,
    {
        let started = Instant::now();
        let deadline = self.get_timeout().and_then(|timeout| started.checked_add(timeout));
        let mut attempts: u32 = 0;

        loop {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                tracing::event!(
                    name: "retrier.execute.timeout",
                    Level::WARN,
                    attempts,
                    timeout = ?self.timeout,
                    elapsed = ?started.elapsed(),
                );
                return Err(ChainError::mask(&TIMEOUT_ERROR, &[Matcher::Any]));
            }

            attempts = attempts.saturating_add(1);
            let error: ChainError = match operation() {
                Ok(value) => {
                    self.after_retry.call(None);
                    return Ok(value);
                }
                Err(error) => error.into(),
            };
            self.after_retry.call(Some(&error));

            if !self.checker.call(&error) {
                return Err(ChainError::mask(error, &[Matcher::Any]));
            }

            if attempts >= self.max_tries {
                self.after_retry_limit.call(&error);
                tracing::event!(
                    name: "retrier.execute.limit",
                    Level::WARN,
                    attempts,
                    max_tries = self.max_tries,
                    error = %error,
                );
                let message = format!("retry limit reached ({attempts}/{})", self.max_tries);
                return Err(ChainError::with_cause(error, &MAX_RETRIES_REACHED_ERROR, message));
            }

            tracing::event!(
                name: "retrier.execute.retry",
                Level::DEBUG,
                attempt = attempts,
                max_tries = self.max_tries,
                sleep = ?self.sleep,
                error = %error,
            );

            if !self.sleep.is_zero() {
                thread::sleep(self.sleep);
            }
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use errchain::{Sentinel, assert_details};

    use super::*;
    use crate::checkers;

    static REJECTED: Sentinel = Sentinel::new("rejected");

    #[test]
    fn success_on_first_attempt_calls_after_retry_once() {
        let outcomes = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&outcomes);
        let policy = RetryPolicy::new().after_retry(move |error| {
            assert!(error.is_none());
            seen.fetch_add(1, Ordering::Relaxed);
        });

        let value = policy.execute(|| Ok::<_, ChainError>(42)).unwrap();

        assert_eq!(value, 42);
        assert_eq!(outcomes.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn recovers_after_transient_failures() {
        let calls = Cell::new(0);

        let value = RetryPolicy::new()
            .execute(|| {
                calls.set(calls.get() + 1);
                if calls.get() < 3 { Err(ChainError::new("transient")) } else { Ok("done") }
            })
            .unwrap();

        assert_eq!(value, "done");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn retry_limit_wraps_last_error() {
        let calls = Cell::new(0);
        let limit_hits = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&limit_hits);
        let policy = RetryPolicy::new().after_retry_limit(move |error| {
            assert_eq!(error.to_string(), "failure 3");
            hits.fetch_add(1, Ordering::Relaxed);
        });

        let error = policy
            .execute(|| {
                calls.set(calls.get() + 1);
                Err::<(), _>(errchain::chain_error!("failure {}", calls.get()))
            })
            .unwrap_err();

        assert_eq!(calls.get(), 3);
        assert_eq!(limit_hits.load(Ordering::Relaxed), 1);
        assert!(error.is_max_retries_reached());
        assert_details!(error, "[{retry limit reached (3/3)} {failure 3}]");
    }

    #[test]
    fn zero_max_tries_behaves_like_one() {
        let calls = Cell::new(0);

        let error = RetryPolicy::new()
            .max_tries(0)
            .execute(|| {
                calls.set(calls.get() + 1);
                Err::<(), _>(ChainError::new("boom"))
            })
            .unwrap_err();

        assert_eq!(calls.get(), 1);
        assert_eq!(error.to_string(), "retry limit reached (1/0): boom");
    }

    #[test]
    fn rejected_failure_is_masked_once_and_keeps_cause() {
        let calls = Cell::new(0);
        let limit_hits = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&limit_hits);

        let error = RetryPolicy::new()
            .checker(checkers::not(checkers::cause_is(&REJECTED)))
            .after_retry_limit(move |_| {
                hits.fetch_add(1, Ordering::Relaxed);
            })
            .execute(|| {
                calls.set(calls.get() + 1);
                Err::<(), _>(ChainError::mask(&REJECTED, &[Matcher::Any]))
            })
            .unwrap_err();

        assert_eq!(calls.get(), 1);
        assert_eq!(limit_hits.load(Ordering::Relaxed), 0);
        assert!(error.cause_is(&REJECTED));
        assert_eq!(error.chain().count(), 3);
        assert_eq!(error.message(), Some(""));
    }

    #[test]
    fn rejected_failure_without_cause_stays_unclassified() {
        let error = RetryPolicy::new()
            .checker(|_| false)
            .execute(|| Err::<(), _>(ChainError::new("plain")))
            .unwrap_err();

        assert!(error.cause().is_none());
        assert_eq!(error.to_string(), "plain");
    }

    #[test]
    fn foreign_errors_are_converted() {
        let error = RetryPolicy::new()
            .checker(|_| false)
            .execute(|| Err::<(), _>(io::Error::other("disk full")))
            .unwrap_err();

        assert_eq!(error.cause().unwrap().to_string(), "disk full");
    }

    #[test]
    fn timeout_aborts_before_next_attempt() {
        let calls = Cell::new(0);

        let error = RetryPolicy::new()
            .timeout(Duration::from_millis(10))
            .max_tries(u32::MAX)
            .execute(|| {
                calls.set(calls.get() + 1);
                thread::sleep(Duration::from_millis(20));
                Err::<(), _>(ChainError::new("slow"))
            })
            .unwrap_err();

        assert_eq!(calls.get(), 1);
        assert!(error.is_timeout());
        assert!(!error.is_max_retries_reached());
    }

    #[test]
    fn after_retry_sees_every_outcome() {
        let outcomes = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorded = Arc::clone(&outcomes);
        let calls = RefCell::new(0);

        let policy = RetryPolicy::new().after_retry(move |error| {
            recorded.lock().unwrap().push(error.map(ToString::to_string));
        });

        let _ = policy.execute(|| {
            *calls.borrow_mut() += 1;
            if *calls.borrow() == 1 { Err(ChainError::new("first")) } else { Ok(()) }
        });

        assert_eq!(*outcomes.lock().unwrap(), vec![Some("first".to_string()), None]);
    }

    #[test]
    fn sleeps_between_attempts() {
        let started = Instant::now();

        let _ = RetryPolicy::new()
            .sleep(Duration::from_millis(5))
            .execute(|| Err::<(), _>(ChainError::new("boom")));

        // three attempts, two pauses
        assert!(started.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn result_location_is_the_caller() {
        let line = line!() + 1;
        let error = RetryPolicy::new().max_tries(1).execute(|| Err::<(), _>(ChainError::new("boom"))).unwrap_err();

        let location = error.location().unwrap();
        assert!(location.file.ends_with("engine.rs"));
        assert_eq!(location.line, line);
    }
}
