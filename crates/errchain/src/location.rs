// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// Source location information (file and line).
///
/// Every chain record captures the location it was constructed at. Capturing is
/// best-effort: a record may also carry no location at all, in which case diagnostics
/// simply omit the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// File where the error was constructed
    pub file: &'static str,
    /// Line number where the error was constructed
    pub line: u32,
}

impl Location {
    /// Creates a new location with file and line information.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Captures the location of the caller.
    ///
    /// When invoked from a function annotated with `#[track_caller]`, the location of the
    /// outermost tracked caller is returned instead.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
