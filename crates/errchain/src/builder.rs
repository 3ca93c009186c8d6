// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use crate::{Cause, ChainError, Location};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum LocationPolicy {
    #[default]
    Caller,
    Explicit(Location),
    Omitted,
}

/// Builder for creating [`ChainError`] records with full control over every field.
///
/// Unlike the [`ChainError`] constructors, the builder does not filter causes: whatever cause
/// is set is stored as-is. By default the record captures the location where
/// [`build`](Self::build) is called.
///
/// # Examples
///
/// ```rust
/// use errchain::{ChainError, Location, TIMEOUT_ERROR};
///
/// let error = ChainError::builder()
///     .message("reading config")
///     .underlying(ChainError::new("file not found"))
///     .cause(&TIMEOUT_ERROR)
///     .location(Location::new("config.rs", 12))
///     .build();
///
/// assert_eq!(error.to_string(), "reading config: file not found");
/// assert!(error.is_timeout());
/// assert_eq!(error.location().unwrap().to_string(), "config.rs:12");
/// ```
#[derive(Debug, Default)]
pub struct ChainErrorBuilder {
    message: Cow<'static, str>,
    underlying: Option<ChainError>,
    cause: Option<Cause>,
    location: LocationPolicy,
}

impl ChainErrorBuilder {
    /// Creates a new builder for a record with an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message of the record.
    #[must_use]
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the next link of the chain.
    #[must_use]
    pub fn underlying(mut self, underlying: impl Into<ChainError>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }

    /// Sets the classified cause of the record.
    #[must_use]
    pub fn cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Records an explicit origin location instead of the caller of [`build`](Self::build).
    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = LocationPolicy::Explicit(location);
        self
    }

    /// Builds a record without any location.
    #[must_use]
    pub fn no_location(mut self) -> Self {
        self.location = LocationPolicy::Omitted;
        self
    }

    /// Builds the [`ChainError`] record.
    #[must_use]
    #[track_caller]
    pub fn build(self) -> ChainError {
        let location = match self.location {
            LocationPolicy::Caller => Some(Location::caller()),
            LocationPolicy::Explicit(location) => Some(location),
            LocationPolicy::Omitted => None,
        };

        ChainError::record(self.message, self.underlying, self.cause, location)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_RETRIES_REACHED_ERROR;

    #[test]
    fn default_builds_empty_record_at_caller() {
        let line = line!() + 1;
        let error = ChainErrorBuilder::new().build();

        assert_eq!(error.message(), Some(""));
        assert_eq!(error.to_string(), "<no error>");
        assert_eq!(error.location().unwrap().line, line);
        assert!(error.cause().is_none());
    }

    #[test]
    fn explicit_fields() {
        let error = ChainError::builder()
            .message("outer")
            .underlying(ChainError::builder().message("inner").no_location().build())
            .cause(&MAX_RETRIES_REACHED_ERROR)
            .location(Location::new("lib.rs", 7))
            .build();

        assert_eq!(error.details(), "[{lib.rs:7: outer} {inner}]");
        assert!(error.is_max_retries_reached());
    }

    #[test]
    fn no_location_renders_without_prefix() {
        let error = ChainError::builder().message("bare").no_location().build();

        assert!(error.location().is_none());
        assert_eq!(error.details(), "[{bare}]");
    }
}
