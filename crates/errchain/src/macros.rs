// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Creates a [`ChainError`](crate::ChainError) with a formatted message.
///
/// The error records the location of the macro invocation.
///
/// ```rust
/// let id = 42;
/// let error = errchain::chain_error!("user {id} not found");
///
/// assert_eq!(error.to_string(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! chain_error {
    ($($arg:tt)+) => {
        $crate::ChainError::new(::std::format!($($arg)+))
    };
}

/// Annotates an error with a formatted message, dropping its cause.
///
/// Shorthand for [`ChainError::note`](crate::ChainError::note) with [`format!`].
///
/// ```rust
/// use errchain::ChainError;
///
/// let attempt = 2;
/// let error = errchain::note_err!(ChainError::new("refused"), "attempt {attempt}");
///
/// assert_eq!(error.to_string(), "attempt 2: refused");
/// ```
#[macro_export]
macro_rules! note_err {
    ($underlying:expr, $($arg:tt)+) => {
        $crate::ChainError::note($underlying, ::std::format!($($arg)+))
    };
}
