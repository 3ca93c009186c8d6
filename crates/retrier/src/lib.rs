// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Blocking retry policies for fallible operations with classified failure reporting.
//!
//! The crate offers two ways to retry an operation.
//!
//! - [`RetryPolicy::execute`] runs an operation under a declarative [`RetryPolicy`]
//!   (attempt limit, overall timeout, delay, retry checker and hooks). Failures are reported
//!   as [`errchain::ChainError`] values whose [`cause`](errchain::ChainError::cause) tells
//!   how the execution ended.
//! - [`retry`] and [`retry_during`] are minimal loops bounded by an attempt count or by wall
//!   clock time. They report a plain [`BoundedRetryError`] that only carries the text of the
//!   last failure.
//!
//! # Outcomes of `execute`
//!
//! | Outcome | Returned error | [`cause`](errchain::ChainError::cause) |
//! |---|---|---|
//! | checker rejects a failure | the failure, masked once | cause of the failure |
//! | last allowed attempt fails | `retry limit reached (n/max): <failure>` | [`MAX_RETRIES_REACHED_ERROR`](errchain::MAX_RETRIES_REACHED_ERROR) |
//! | timeout elapsed before an attempt | the timeout sentinel, masked | [`TIMEOUT_ERROR`](errchain::TIMEOUT_ERROR) |
//!
//! ```rust
//! use std::time::Duration;
//!
//! use errchain::ChainError;
//! use retrier::RetryPolicy;
//!
//! let policy = RetryPolicy::new()
//!     .max_tries(4)
//!     .sleep(Duration::from_millis(1))
//!     .after_retry_limit(|error| eprintln!("giving up: {error}"));
//!
//! let error = policy
//!     .execute(|| Err::<(), _>(ChainError::new("service unavailable")))
//!     .unwrap_err();
//!
//! assert!(error.is_max_retries_reached());
//! assert_eq!(error.to_string(), "retry limit reached (4/4): service unavailable");
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber. See [`telemetry`] for
//! the event names.
//!
//! # Features
//!
//! - `serde`: enables [`RetryConfig`], a serializable form of the policy settings.

mod bounded;
mod callbacks;
pub mod checkers;
#[cfg(any(feature = "serde", test))]
mod config;
mod constants;
mod engine;
mod fn_wrapper;
mod policy;
pub mod telemetry;

pub use bounded::{BoundedRetryError, retry, retry_during};
#[cfg(any(feature = "serde", test))]
pub use config::{ConfigError, RetryConfig};
pub use constants::{DEFAULT_MAX_TRIES, DEFAULT_SLEEP, DEFAULT_TIMEOUT};
pub use policy::RetryPolicy;
