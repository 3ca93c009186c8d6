// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::{Cause, ChainError, Sentinel};

/// A predicate over causes that decides whether masking keeps a cause.
///
/// Masking keeps the cause of the wrapped error if at least one matcher accepts it.
///
/// # Examples
///
/// ```rust
/// use errchain::{ChainError, Matcher, TIMEOUT_ERROR};
///
/// let only_sentinels = Matcher::with(|cause| cause.sentinel().is_some());
///
/// let kept = ChainError::mask(&TIMEOUT_ERROR, &[only_sentinels.clone()]);
/// assert!(kept.is_timeout());
///
/// let dropped = ChainError::mask(std::io::Error::other("boom"), &[only_sentinels]);
/// assert!(dropped.cause().is_none());
/// ```
#[derive(Clone)]
#[non_exhaustive]
pub enum Matcher {
    /// Accepts every cause.
    Any,
    /// Accepts a cause identical to the given one.
    Is(Cause),
    /// Accepts a cause for which the function returns `true`.
    With(Arc<dyn Fn(&Cause) -> bool + Send + Sync>),
}

impl Matcher {
    /// Creates a matcher that accepts exactly the given sentinel.
    #[must_use]
    pub fn is(sentinel: &'static Sentinel) -> Self {
        Self::Is(Cause::from(sentinel))
    }

    /// Creates a matcher from an arbitrary predicate.
    #[must_use]
    pub fn with(predicate: impl Fn(&Cause) -> bool + Send + Sync + 'static) -> Self {
        Self::With(Arc::new(predicate))
    }

    /// Returns `true` if this matcher accepts the cause.
    #[must_use]
    pub fn matches(&self, cause: &Cause) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => expected == cause,
            Self::With(predicate) => predicate(cause),
        }
    }
}

impl Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Is(cause) => f.debug_tuple("Is").field(cause).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

impl From<&'static Sentinel> for Matcher {
    fn from(sentinel: &'static Sentinel) -> Self {
        Self::is(sentinel)
    }
}

/// A reusable set of matchers.
///
/// Holds matchers that are applied on every call to [`mask`](Self::mask), together with
/// any extra matchers passed at the call site.
///
/// ```rust
/// use errchain::{ChainError, Masker, Matcher, MAX_RETRIES_REACHED_ERROR, TIMEOUT_ERROR};
///
/// let masker = Masker::new([Matcher::is(&TIMEOUT_ERROR)]);
///
/// assert!(masker.mask(&TIMEOUT_ERROR, &[]).is_timeout());
/// assert!(masker.mask(&MAX_RETRIES_REACHED_ERROR, &[]).cause().is_none());
/// assert!(masker
///     .mask(&MAX_RETRIES_REACHED_ERROR, &[Matcher::is(&MAX_RETRIES_REACHED_ERROR)])
///     .is_max_retries_reached());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Masker {
    matchers: Vec<Matcher>,
}

impl Masker {
    /// Creates a masker that always applies the given matchers.
    #[must_use]
    pub fn new(matchers: impl IntoIterator<Item = Matcher>) -> Self {
        Self {
            matchers: matchers.into_iter().collect(),
        }
    }

    /// Returns the matchers that are always applied.
    #[must_use]
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Masks `underlying` with the stored matchers plus `extra`.
    #[must_use]
    #[track_caller]
    pub fn mask(&self, underlying: impl Into<ChainError>, extra: &[Matcher]) -> ChainError {
        if extra.is_empty() {
            return ChainError::mask(underlying, &self.matchers);
        }

        let matchers: Vec<_> = self.matchers.iter().chain(extra).cloned().collect();
        ChainError::mask(underlying, &matchers)
    }
}
