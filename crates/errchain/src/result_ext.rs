// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use crate::{Cause, ChainError, Matcher};

/// Chain-building methods for `Result`.
///
/// Each method leaves an `Ok` value untouched and wraps the error otherwise. The wrapping
/// record captures the location of the caller.
///
/// # Examples
///
/// ```rust
/// use errchain::{ChainError, Matcher, ResultExt};
///
/// fn read_config() -> Result<String, ChainError> {
///     std::fs::read_to_string("/definitely/not/here.toml").note_err("reading config")
/// }
///
/// let error = read_config().unwrap_err();
/// assert!(error.to_string().starts_with("reading config: "));
///
/// let ok: Result<u32, ChainError> = Ok(3);
/// assert_eq!(ok.mask_err(&[Matcher::Any]).unwrap(), 3);
/// ```
pub trait ResultExt<T> {
    /// Masks the error with [`ChainError::mask`].
    ///
    /// # Errors
    ///
    /// Returns the masked error if `self` is an error.
    fn mask_err(self, matchers: &[Matcher]) -> Result<T, ChainError>;

    /// Annotates the error with [`ChainError::note`].
    ///
    /// # Errors
    ///
    /// Returns the annotated error if `self` is an error.
    fn note_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, ChainError>;

    /// Annotates and classifies the error with [`ChainError::with_cause`].
    ///
    /// # Errors
    ///
    /// Returns the classified error if `self` is an error.
    fn with_cause_err(self, cause: impl Into<Cause>, message: impl Into<Cow<'static, str>>) -> Result<T, ChainError>;
}

// `map_err` closures would hide the caller from `#[track_caller]`, hence the explicit matches.
impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ChainError>,
{
    #[track_caller]
    fn mask_err(self, matchers: &[Matcher]) -> Result<T, ChainError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ChainError::mask(error, matchers)),
        }
    }

    #[track_caller]
    fn note_err(self, message: impl Into<Cow<'static, str>>) -> Result<T, ChainError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ChainError::note(error, message)),
        }
    }

    #[track_caller]
    fn with_cause_err(self, cause: impl Into<Cause>, message: impl Into<Cow<'static, str>>) -> Result<T, ChainError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ChainError::with_cause(error, cause, message)),
        }
    }
}
