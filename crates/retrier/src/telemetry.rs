// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Names of the `tracing` events emitted by this crate.
//!
//! The names are passed to `tracing::event!` as literals (the macro requires constant
//! expressions), so these constants exist for consumers that filter on them and for tests.

/// A bounded retry loop (`retry` or `retry_during`) is about to retry after a failure.
pub const RETRY_EVENT: &str = "retrier.retry";

/// [`RetryPolicy::execute`](crate::RetryPolicy::execute) is about to retry after a failure.
pub const EXECUTE_RETRY_EVENT: &str = "retrier.execute.retry";

/// [`RetryPolicy::execute`](crate::RetryPolicy::execute) gave up because its timeout elapsed.
pub const EXECUTE_TIMEOUT_EVENT: &str = "retrier.execute.timeout";

/// [`RetryPolicy::execute`](crate::RetryPolicy::execute) gave up because it ran out of attempts.
pub const EXECUTE_LIMIT_EVENT: &str = "retrier.execute.limit";
