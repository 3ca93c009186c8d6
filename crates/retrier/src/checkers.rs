// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Ready-made retry checkers for [`RetryPolicy::checker`](crate::RetryPolicy::checker).
//!
//! A checker decides whether a failed attempt is worth retrying. Returning `false` ends
//! [`RetryPolicy::execute`](crate::RetryPolicy::execute) immediately.
//!
//! ```rust
//! use errchain::{ChainError, TIMEOUT_ERROR};
//! use retrier::{RetryPolicy, checkers};
//!
//! // retry everything except timeouts reported by the operation itself
//! let policy = RetryPolicy::new().checker(checkers::not(checkers::cause_is(&TIMEOUT_ERROR)));
//!
//! let mut calls = 0;
//! let result: Result<(), _> = policy.execute(|| {
//!     calls += 1;
//!     Err(ChainError::from(&TIMEOUT_ERROR))
//! });
//!
//! assert_eq!(calls, 1);
//! assert!(result.unwrap_err().is_timeout());
//! ```

use errchain::{ChainError, Sentinel};

/// Retries every failure. This is the default checker.
#[must_use]
pub fn any(_error: &ChainError) -> bool {
    true
}

/// Inverts a checker.
#[must_use]
pub fn not<F>(checker: F) -> impl Fn(&ChainError) -> bool + Send + Sync + 'static
where
    F: Fn(&ChainError) -> bool + Send + Sync + 'static,
{
    move |error| !checker(error)
}

/// Retries only failures classified as the given sentinel.
#[must_use]
pub fn cause_is(sentinel: &'static Sentinel) -> impl Fn(&ChainError) -> bool + Send + Sync + 'static {
    move |error| error.cause_is(sentinel)
}
