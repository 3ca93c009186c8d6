// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::{Location, Sentinel};

/// The classified identity of a failure, extracted from an error chain.
///
/// A cause is a shared reference: it never owns the failure it identifies. Causes compare by
/// identity. Two causes are equal only if they refer to the same [`Sentinel`] item or to the
/// same shared foreign error allocation.
///
/// # Examples
///
/// ```rust
/// use errchain::{Cause, ChainError, Matcher, TIMEOUT_ERROR};
///
/// let error = ChainError::mask(&TIMEOUT_ERROR, &[Matcher::Any]);
/// let cause = error.cause().unwrap();
///
/// assert!(cause.is(&TIMEOUT_ERROR));
/// assert_eq!(cause, Cause::from(&TIMEOUT_ERROR));
/// ```
#[derive(Clone)]
pub struct Cause(pub(crate) CauseRepr);

#[derive(Clone)]
pub(crate) enum CauseRepr {
    Sentinel(&'static Sentinel),
    Foreign(Arc<dyn StdError + Send + Sync>),
}

impl Cause {
    /// Returns `true` if this cause is the given sentinel.
    #[must_use]
    pub fn is(&self, sentinel: &Sentinel) -> bool {
        self.sentinel().is_some_and(|own| own == sentinel)
    }

    /// Returns the sentinel this cause refers to, if it refers to one.
    #[must_use]
    pub fn sentinel(&self) -> Option<&'static Sentinel> {
        match &self.0 {
            CauseRepr::Sentinel(sentinel) => Some(*sentinel),
            CauseRepr::Foreign(_) => None,
        }
    }

    /// Returns the failure this cause refers to as a standard error.
    #[must_use]
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        match &self.0 {
            CauseRepr::Sentinel(sentinel) => *sentinel,
            CauseRepr::Foreign(error) => error.as_ref(),
        }
    }

    pub(crate) fn location(&self) -> Option<&Location> {
        match &self.0 {
            CauseRepr::Sentinel(sentinel) => sentinel.location(),
            CauseRepr::Foreign(_) => None,
        }
    }

    pub(crate) const fn kind(&self) -> &'static str {
        match &self.0 {
            CauseRepr::Sentinel(_) => "sentinel",
            CauseRepr::Foreign(_) => "error",
        }
    }
}

impl From<&'static Sentinel> for Cause {
    fn from(sentinel: &'static Sentinel) -> Self {
        Self(CauseRepr::Sentinel(sentinel))
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (CauseRepr::Sentinel(a), CauseRepr::Sentinel(b)) => a == b,
            (CauseRepr::Foreign(a), CauseRepr::Foreign(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Cause {}

impl PartialEq<Sentinel> for Cause {
    fn eq(&self, other: &Sentinel) -> bool {
        self.is(other)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            CauseRepr::Sentinel(sentinel) => f.debug_tuple("Cause::Sentinel").field(&sentinel.message()).finish(),
            CauseRepr::Foreign(error) => f.debug_tuple("Cause::Foreign").field(&error.to_string()).finish(),
        }
    }
}
