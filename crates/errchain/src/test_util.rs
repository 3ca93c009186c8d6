// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities for the errchain crate.
//!
//! This module is only available when the `test-util` feature is enabled.

/// Assert that the [`details`](crate::ChainError::details) of an error match the expected
/// rendering once location prefixes are ignored.
///
/// Locations depend on source positions, so comparing them literally makes tests brittle.
/// The macro renders the chain with [`Details::without_locations`](crate::Details::without_locations).
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use errchain::{assert_details, ChainError};
///
/// let error = ChainError::note(ChainError::new("inner"), "outer");
/// assert_details!(error, "[{outer} {inner}]");
/// # }
/// ```
#[macro_export]
#[cfg_attr(coverage_nightly, coverage(off))] // coverage doesn't handle panics well
macro_rules! assert_details {
    ($error:expr, $expected:expr) => {{
        let error: &$crate::ChainError = &$error;
        let actual = $crate::Details::new(::std::option::Option::Some(error))
            .without_locations()
            .to_string();
        let expected: &str = $expected;

        if actual != expected {
            panic!("left : {expected}\nright: {actual}");
        }
    }};
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use crate::{ChainError, Matcher, TIMEOUT_ERROR};

    #[test]
    fn matches_ignoring_locations() {
        let error = ChainError::mask(&TIMEOUT_ERROR, &[Matcher::Any]);
        assert_details!(error, "[{} {Operation aborted. Timeout occured}]");
    }

    #[test]
    #[should_panic(expected = "left : [{expected}]\nright: [{actual}]")]
    fn mismatch_panics() {
        assert_details!(ChainError::new("actual"), "[{expected}]");
    }
}
