// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use errchain::ChainError;

use crate::callbacks::{AfterRetry, AfterRetryLimit, Checker};
use crate::constants::{DEFAULT_MAX_TRIES, DEFAULT_SLEEP, DEFAULT_TIMEOUT};

// Naming Convention for Get/Set:
//
// This type uses an unconventional naming pattern where setters use plain names (e.g., `timeout()`)
// and getters use the `get_` prefix (e.g., `get_timeout()`). Policies are configured far more often
// than they are inspected, and the `get_` prefix keeps getters apart from their setters.

/// Declarative configuration of [`execute`](Self::execute).
///
/// A policy starts out with defaults and every setter overrides one field. Calling the same
/// setter again replaces the earlier value.
///
/// | Field | Default | Set by |
/// |---|---|---|
/// | maximum attempts | [`DEFAULT_MAX_TRIES`] (3) | [`max_tries`](Self::max_tries) |
/// | overall timeout | [`DEFAULT_TIMEOUT`] (15 s) | [`timeout`](Self::timeout), [`no_timeout`](Self::no_timeout) |
/// | delay between attempts | none | [`sleep`](Self::sleep) |
/// | retry checker | retry every failure | [`checker`](Self::checker) |
/// | hook after every attempt | none | [`after_retry`](Self::after_retry) |
/// | hook when attempts run out | none | [`after_retry_limit`](Self::after_retry_limit) |
///
/// Policies are cheap to clone and can be shared across threads. Hooks run on the thread
/// that calls [`execute`](Self::execute).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use retrier::RetryPolicy;
///
/// let policy = RetryPolicy::new()
///     .max_tries(5)
///     .timeout(Duration::from_secs(2))
///     .sleep(Duration::from_millis(100))
///     .after_retry(|error| {
///         if let Some(error) = error {
///             eprintln!("attempt failed: {error}");
///         }
///     });
///
/// assert_eq!(policy.get_max_tries(), 5);
/// assert_eq!(policy.get_timeout(), Some(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub(crate) max_tries: u32,
    pub(crate) timeout: Duration,
    pub(crate) sleep: Duration,
    pub(crate) checker: Checker,
    pub(crate) after_retry: AfterRetry,
    pub(crate) after_retry_limit: AfterRetryLimit,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Creates a policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            timeout: DEFAULT_TIMEOUT,
            sleep: DEFAULT_SLEEP,
            checker: Checker::any(),
            after_retry: AfterRetry::noop(),
            after_retry_limit: AfterRetryLimit::noop(),
        }
    }

    /// Sets the maximum number of attempts, including the first one.
    ///
    /// A value of `0` behaves like `1`: the first retryable failure ends the execution.
    #[must_use]
    pub fn max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Sets the overall time budget.
    ///
    /// The budget is checked before each attempt, so an attempt that outlives it is completed
    /// and its outcome handled normally. [`Duration::ZERO`] disables the budget.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables the overall time budget.
    #[must_use]
    pub fn no_timeout(self) -> Self {
        self.timeout(Duration::ZERO)
    }

    /// Sets the delay between a retryable failure and the next attempt.
    #[must_use]
    pub fn sleep(mut self, sleep: Duration) -> Self {
        self.sleep = sleep;
        self
    }

    /// Sets the function that decides whether a failure is retried.
    ///
    /// When it returns `false`, [`execute`](Self::execute) ends immediately and returns the
    /// failure wrapped once, with its cause preserved. See [`checkers`](crate::checkers) for
    /// ready-made checkers.
    #[must_use]
    pub fn checker(mut self, checker: impl Fn(&ChainError) -> bool + Send + Sync + 'static) -> Self {
        self.checker = Checker::new(checker);
        self
    }

    /// Sets the hook invoked after every attempt.
    ///
    /// The hook receives the failure of the attempt, or `None` if it succeeded.
    #[must_use]
    pub fn after_retry(mut self, after_retry: impl Fn(Option<&ChainError>) + Send + Sync + 'static) -> Self {
        self.after_retry = AfterRetry::new(after_retry);
        self
    }

    /// Sets the hook invoked once when the last allowed attempt fails with a retryable failure.
    #[must_use]
    pub fn after_retry_limit(mut self, after_retry_limit: impl Fn(&ChainError) + Send + Sync + 'static) -> Self {
        self.after_retry_limit = AfterRetryLimit::new(after_retry_limit);
        self
    }

    /// Returns the maximum number of attempts.
    #[must_use]
    pub fn get_max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the overall time budget, or `None` if it is disabled.
    #[must_use]
    pub fn get_timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }

    /// Returns the delay between attempts.
    #[must_use]
    pub fn get_sleep(&self) -> Duration {
        self.sleep
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static_assertions::assert_impl_all!(RetryPolicy: Send, Sync, Clone, std::fmt::Debug);

    #[test]
    fn defaults() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.get_max_tries(), 3);
        assert_eq!(policy.get_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(policy.get_sleep(), Duration::ZERO);
        assert!(policy.checker.call(&ChainError::new("x")));
    }

    #[test]
    fn later_setters_override_earlier_ones() {
        let policy = RetryPolicy::new()
            .max_tries(5)
            .max_tries(2)
            .sleep(Duration::from_millis(5))
            .timeout(Duration::from_secs(1))
            .no_timeout();

        assert_eq!(policy.get_max_tries(), 2);
        assert_eq!(policy.get_sleep(), Duration::from_millis(5));
        assert_eq!(policy.get_timeout(), None);
    }

    #[test]
    fn zero_timeout_disables_budget() {
        let policy = RetryPolicy::new().timeout(Duration::ZERO);
        assert_eq!(policy.get_timeout(), None);
    }

    #[test]
    fn hooks_are_shared_between_clones() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let policy = RetryPolicy::new().after_retry(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let cloned = policy.clone();
        policy.after_retry.call(None);
        cloned.after_retry.call(None);

        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn debug_lists_fields() {
        let debug = format!("{:?}", RetryPolicy::new());

        assert!(debug.starts_with("RetryPolicy { max_tries: 3, timeout: 15s, sleep: 0ns"));
        assert!(debug.contains("checker: Checker"));
    }
}
