// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::{fmt, ptr};

use crate::{ChainError, Location};

/// The failure identity reported when a retried operation exceeds its timeout.
pub static TIMEOUT_ERROR: Sentinel = crate::sentinel!("Operation aborted. Timeout occured");

/// The failure identity reported when a retried operation runs out of attempts.
pub static MAX_RETRIES_REACHED_ERROR: Sentinel = crate::sentinel!("Operation aborted. Too many errors.");

/// A singleton error value that is compared by identity, not by content.
///
/// Sentinels are meant to be declared as `static` items. Two sentinels are equal only if
/// they are the same item, even when their messages are identical. Use
/// [`ChainError::cause`] together with [`Cause::is`](crate::Cause::is) (or the shortcut
/// [`ChainError::cause_is`]) to test whether a chain is classified as a given sentinel.
///
/// # Examples
///
/// ```rust
/// use errchain::{ChainError, Matcher, Sentinel};
///
/// static NOT_FOUND: Sentinel = errchain::sentinel!("not found");
///
/// let error = ChainError::mask(&NOT_FOUND, &[Matcher::is(&NOT_FOUND)]);
/// assert!(error.cause_is(&NOT_FOUND));
/// ```
#[derive(Debug)]
pub struct Sentinel {
    message: &'static str,
    location: Option<Location>,
}

impl Sentinel {
    /// Creates a sentinel without location information.
    ///
    /// Prefer the [`sentinel!`](crate::sentinel) macro, which records where the sentinel is declared.
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message, location: None }
    }

    /// Creates a sentinel declared at the given location.
    #[must_use]
    pub const fn located(message: &'static str, location: Location) -> Self {
        Self {
            message,
            location: Some(location),
        }
    }

    /// Returns the sentinel message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Returns where the sentinel was declared, if known.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl PartialEq for Sentinel {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for Sentinel {}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl StdError for Sentinel {}

/// Declares a [`Sentinel`] that records the file and line of its declaration.
///
/// The expansion is a constant expression, so it can initialize a `static` item.
///
/// ```rust
/// use errchain::Sentinel;
///
/// static CONFLICT: Sentinel = errchain::sentinel!("version conflict");
///
/// assert_eq!(CONFLICT.message(), "version conflict");
/// assert!(CONFLICT.location().is_some());
/// ```
#[macro_export]
macro_rules! sentinel {
    ($message:expr) => {
        $crate::Sentinel::located($message, $crate::Location::new(file!(), line!()))
    };
}

/// Returns `true` if the error is classified as [`TIMEOUT_ERROR`].
#[must_use]
pub fn is_timeout(error: &ChainError) -> bool {
    error.cause_is(&TIMEOUT_ERROR)
}

/// Returns `true` if the error is classified as [`MAX_RETRIES_REACHED_ERROR`].
#[must_use]
pub fn is_max_retries_reached(error: &ChainError) -> bool {
    error.cause_is(&MAX_RETRIES_REACHED_ERROR)
}
