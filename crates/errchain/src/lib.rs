// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Error chains with classified causes and origin locations.
//!
//! An error travels up the call stack through several layers, and each layer may wrap it
//! with more context. `errchain` keeps three things apart while doing so:
//!
//! - the **chain**: every wrapping layer keeps the error it wraps, so the full history stays
//!   available for diagnostics ([`ChainError::details`]);
//! - the **cause**: a coarse, programmatically testable identity such as
//!   [`TIMEOUT_ERROR`] that a layer may keep or deliberately drop ([`ChainError::cause`]);
//! - the **location**: the file and line where each layer was created, captured
//!   automatically through `#[track_caller]`.
//!
//! # Wrapping errors
//!
//! | Operation | Message | Cause of the new layer |
//! |---|---|---|
//! | [`ChainError::new`], [`chain_error!`] | given | none |
//! | [`ChainError::mask`], [`ResultExt::mask_err`], [`Masker::mask`] | empty | kept if a [`Matcher`] accepts it |
//! | [`ChainError::note`], [`note_err!`], [`ResultExt::note_err`] | given | none |
//! | [`ChainError::with_cause`], [`ResultExt::with_cause_err`] | given | the explicit cause |
//!
//! ```rust
//! use errchain::{ChainError, Matcher, ResultExt, Sentinel};
//!
//! static NOT_FOUND: Sentinel = errchain::sentinel!("not found");
//!
//! fn lookup(key: &str) -> Result<u32, ChainError> {
//!     Err(ChainError::with_cause(errchain::chain_error!("no entry for {key}"), &NOT_FOUND, "lookup"))
//! }
//!
//! fn handler() -> Result<u32, ChainError> {
//!     // callers may test for NOT_FOUND, every other cause is hidden
//!     lookup("alice").mask_err(&[Matcher::is(&NOT_FOUND)])
//! }
//!
//! let error = handler().unwrap_err();
//! assert!(error.cause_is(&NOT_FOUND));
//! assert_eq!(error.to_string(), "lookup: no entry for alice");
//! ```
//!
//! # Diagnostics
//!
//! [`Display`](std::fmt::Display) joins the non-empty messages of the chain with `": "`.
//! [`Details`] renders the whole chain, including locations, in a stable bracketed format:
//!
//! ```text
//! [{src/api.rs:20: } {src/db.rs:12: lookup} {src/db.rs:12: no entry for alice}]
//! ```
//!
//! `{:?}` prints the same details and `{:#?}` additionally prints the cause stored by every
//! layer.

mod builder;
mod cause;
mod chain_error;
mod details;
mod location;
mod macros;
mod matcher;
mod result_ext;
mod sentinel;

#[cfg(any(feature = "test-util", test))]
pub mod test_util;

pub use builder::ChainErrorBuilder;
pub use cause::Cause;
pub use chain_error::{Chain, ChainError};
pub use details::{Details, details};
pub use location::Location;
pub use matcher::{Masker, Matcher};
pub use result_ext::ResultExt;
pub use sentinel::{MAX_RETRIES_REACHED_ERROR, Sentinel, TIMEOUT_ERROR, is_max_retries_reached, is_timeout};
