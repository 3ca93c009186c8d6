// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::cause::CauseRepr;
use crate::{Cause, ChainErrorBuilder, Details, Location, Matcher, Sentinel};

/// One link of an error chain.
///
/// A `ChainError` is one of a small closed set of variants, each of which answers the chain
/// accessors ([`message`](Self::message), [`underlying`](Self::underlying),
/// [`cause`](Self::cause) and [`location`](Self::location)) deterministically:
///
/// | Variant | message | underlying | cause | location |
/// |---|---|---|---|---|
/// | sentinel | sentinel message | none | the sentinel itself | declaration site |
/// | record | record message (may be empty) | optional | the stored cause, if any | construction site |
/// | foreign error | none, terminates the chain | none | the foreign error itself | none |
///
/// Records are created by [`new`](Self::new), [`mask`](Self::mask), [`note`](Self::note),
/// [`with_cause`](Self::with_cause) and the [`builder`](Self::builder). They capture the
/// location of the caller and are never modified after construction.
///
/// The inner data is boxed so that a `ChainError` is a single pointer wide.
///
/// # Examples
///
/// ```rust
/// use errchain::{ChainError, Matcher, TIMEOUT_ERROR};
///
/// let timeout = ChainError::mask(&TIMEOUT_ERROR, &[Matcher::Any]);
/// let annotated = ChainError::note(timeout, "loading profile");
///
/// assert_eq!(annotated.to_string(), "loading profile: Operation aborted. Timeout occured");
/// // annotating drops the classification, masking with a matching predicate keeps it
/// assert!(annotated.cause().is_none());
/// ```
#[derive(Clone)]
pub struct ChainError {
    repr: Box<Repr>,
}

#[derive(Clone)]
enum Repr {
    Sentinel(&'static Sentinel),
    Record(Record),
    Foreign(Arc<dyn StdError + Send + Sync>),
}

#[derive(Clone)]
struct Record {
    message: Cow<'static, str>,
    underlying: Option<ChainError>,
    cause: Option<Cause>,
    location: Option<Location>,
}

impl ChainError {
    /// Creates an error with the given message and no underlying error.
    ///
    /// Captures the location of the caller. Use [`chain_error!`](crate::chain_error) for a
    /// formatted message.
    #[must_use]
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::record(message.into(), None, None, Some(Location::caller()))
    }

    /// Creates a new [`ChainErrorBuilder`] for full control over the constructed record.
    #[must_use]
    pub fn builder() -> ChainErrorBuilder {
        ChainErrorBuilder::new()
    }

    /// Wraps an arbitrary error as the innermost link of a chain.
    ///
    /// A foreign error has no message capability: diagnostics render its text and stop there.
    /// Its cause is the error itself. Passing a `ChainError` returns it unchanged.
    #[must_use]
    pub fn foreign<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(error);
        Self::from(boxed)
    }

    /// Wraps `underlying` in a record with an empty message.
    ///
    /// The cause of `underlying` is carried over only if it satisfies at least one of the
    /// `matchers`. Otherwise the new record has no cause, although `underlying` stays in the
    /// chain and is still visible in [`details`](Self::details). Passing no matchers always
    /// drops the cause.
    ///
    /// Use [`ResultExt::mask_err`](crate::ResultExt::mask_err) to mask the error of a
    /// `Result` and leave successes untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errchain::{ChainError, Matcher, MAX_RETRIES_REACHED_ERROR, TIMEOUT_ERROR};
    ///
    /// let kept = ChainError::mask(&TIMEOUT_ERROR, &[Matcher::is(&TIMEOUT_ERROR)]);
    /// assert!(kept.is_timeout());
    ///
    /// let dropped = ChainError::mask(&TIMEOUT_ERROR, &[Matcher::is(&MAX_RETRIES_REACHED_ERROR)]);
    /// assert!(dropped.cause().is_none());
    /// assert_eq!(dropped.to_string(), "Operation aborted. Timeout occured");
    /// ```
    #[must_use]
    #[track_caller]
    pub fn mask(underlying: impl Into<Self>, matchers: &[Matcher]) -> Self {
        let location = Location::caller();
        let underlying = underlying.into();
        let previous = underlying.cause();
        let cause = previous.clone().filter(|cause| matchers.iter().any(|matcher| matcher.matches(cause)));

        trace_cause_change(previous.as_ref(), cause.as_ref(), matchers.len(), location);

        Self::record(Cow::Borrowed(""), Some(underlying), cause, Some(location))
    }

    /// Wraps `underlying` in a record that adds a message.
    ///
    /// The cause of `underlying` is always dropped. Use [`with_cause`](Self::with_cause) to
    /// annotate and classify at the same time.
    #[must_use]
    #[track_caller]
    pub fn note(underlying: impl Into<Self>, message: impl Into<Cow<'static, str>>) -> Self {
        let location = Location::caller();
        let underlying = underlying.into();

        trace_cause_change(underlying.cause().as_ref(), None, 0, location);

        Self::record(message.into(), Some(underlying), None, Some(location))
    }

    /// Wraps `underlying` in a record with a message and an explicit cause.
    ///
    /// No predicate filtering takes place: the given cause is attached as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errchain::{ChainError, MAX_RETRIES_REACHED_ERROR};
    ///
    /// let error = ChainError::with_cause(ChainError::new("503"), &MAX_RETRIES_REACHED_ERROR, "gave up");
    ///
    /// assert!(error.is_max_retries_reached());
    /// assert_eq!(error.to_string(), "gave up: 503");
    /// ```
    #[must_use]
    #[track_caller]
    pub fn with_cause(underlying: impl Into<Self>, cause: impl Into<Cause>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::record(message.into(), Some(underlying.into()), Some(cause.into()), Some(Location::caller()))
    }

    pub(crate) fn record(
        message: Cow<'static, str>,
        underlying: Option<Self>,
        cause: Option<Cause>,
        location: Option<Location>,
    ) -> Self {
        Self {
            repr: Box::new(Repr::Record(Record {
                message,
                underlying,
                cause,
                location,
            })),
        }
    }

    /// Returns the message of this link.
    ///
    /// Foreign errors have no message capability and return `None`. Records may return an
    /// empty message, for example when created by [`mask`](Self::mask).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self.repr.as_ref() {
            Repr::Sentinel(sentinel) => Some(sentinel.message()),
            Repr::Record(record) => Some(&*record.message),
            Repr::Foreign(_) => None,
        }
    }

    /// Returns the next link of the chain, if any.
    #[must_use]
    pub fn underlying(&self) -> Option<&Self> {
        match self.repr.as_ref() {
            Repr::Record(record) => record.underlying.as_ref(),
            Repr::Sentinel(_) | Repr::Foreign(_) => None,
        }
    }

    /// Returns the classified cause of this error.
    ///
    /// A sentinel or a foreign error is its own cause. A record returns the cause it was
    /// constructed with, which may be absent.
    #[must_use]
    pub fn cause(&self) -> Option<Cause> {
        match self.repr.as_ref() {
            Repr::Sentinel(sentinel) => Some(Cause::from(*sentinel)),
            Repr::Record(record) => record.cause.clone(),
            Repr::Foreign(error) => Some(Cause(CauseRepr::Foreign(Arc::clone(error)))),
        }
    }

    /// Returns `true` if the cause of this error is the given sentinel.
    #[must_use]
    pub fn cause_is(&self, sentinel: &Sentinel) -> bool {
        match self.repr.as_ref() {
            Repr::Sentinel(own) => *own == sentinel,
            Repr::Record(record) => record.cause.as_ref().is_some_and(|cause| cause.is(sentinel)),
            Repr::Foreign(_) => false,
        }
    }

    /// Returns `true` if this error is classified as [`TIMEOUT_ERROR`](crate::TIMEOUT_ERROR).
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        crate::is_timeout(self)
    }

    /// Returns `true` if this error is classified as
    /// [`MAX_RETRIES_REACHED_ERROR`](crate::MAX_RETRIES_REACHED_ERROR).
    #[must_use]
    pub fn is_max_retries_reached(&self) -> bool {
        crate::is_max_retries_reached(self)
    }

    /// Returns where this link was constructed, if known.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self.repr.as_ref() {
            Repr::Sentinel(sentinel) => sentinel.location(),
            Repr::Record(record) => record.location.as_ref(),
            Repr::Foreign(_) => None,
        }
    }

    /// Returns the explicitly stored cause of a record.
    ///
    /// Unlike [`cause`](Self::cause), sentinels and foreign errors do not report themselves.
    pub(crate) fn stored_cause(&self) -> Option<&Cause> {
        match self.repr.as_ref() {
            Repr::Record(record) => record.cause.as_ref(),
            Repr::Sentinel(_) | Repr::Foreign(_) => None,
        }
    }

    /// Returns an iterator over the links of the chain, from outermost to innermost.
    ///
    /// The first item is always `self`.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Returns the innermost link of the chain.
    #[must_use]
    pub fn root(&self) -> &Self {
        let mut current = self;
        while let Some(next) = current.underlying() {
            current = next;
        }
        current
    }

    /// Renders the whole chain as a bracketed diagnostic string.
    ///
    /// Each link becomes `{<location>: <message>}`, or `{<text>}` for a foreign error.
    /// Links are separated by a single space and the sequence is wrapped in `[` and `]`.
    /// Use [`Details`] to customize the rendering.
    ///
    /// ```rust
    /// use errchain::ChainError;
    ///
    /// let error = ChainError::note(std::io::Error::other("disk full"), "saving");
    /// let details = error.details();
    ///
    /// assert!(details.starts_with("[{"));
    /// assert!(details.ends_with(": saving} {disk full}]"));
    /// ```
    #[must_use]
    pub fn details(&self) -> String {
        Details::new(Some(self)).to_string()
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr.as_ref() {
            Repr::Sentinel(sentinel) => f.write_str(sentinel.message()),
            Repr::Foreign(error) => fmt::Display::fmt(error, f),
            Repr::Record(record) => match (record.message.is_empty(), &record.underlying) {
                (true, None) => f.write_str("<no error>"),
                (true, Some(underlying)) => fmt::Display::fmt(underlying, f),
                (false, None) => f.write_str(&record.message),
                (false, Some(underlying)) => write!(f, "{}: {underlying}", record.message),
            },
        }
    }
}

impl fmt::Debug for ChainError {
    /// Prints the [`details`](ChainError::details) of the chain. The alternate form `{:#?}`
    /// also prints the explicit cause of every link.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = Details::new(Some(self));
        if f.alternate() {
            fmt::Display::fmt(&details.with_causes(), f)
        } else {
            fmt::Display::fmt(&details, f)
        }
    }
}

impl StdError for ChainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.repr.as_ref() {
            Repr::Record(record) => record.underlying.as_ref().map(|underlying| underlying as &(dyn StdError + 'static)),
            Repr::Foreign(error) => error.source(),
            Repr::Sentinel(_) => None,
        }
    }
}

impl From<&'static Sentinel> for ChainError {
    fn from(sentinel: &'static Sentinel) -> Self {
        Self {
            repr: Box::new(Repr::Sentinel(sentinel)),
        }
    }
}

impl From<Box<dyn StdError + Send + Sync>> for ChainError {
    fn from(error: Box<dyn StdError + Send + Sync>) -> Self {
        match error.downcast::<Self>() {
            Ok(chain) => *chain,
            Err(error) => Self {
                repr: Box::new(Repr::Foreign(Arc::from(error))),
            },
        }
    }
}

impl From<std::io::Error> for ChainError {
    fn from(error: std::io::Error) -> Self {
        Self::foreign(error)
    }
}

/// Iterator over the links of an error chain.
///
/// Created by [`ChainError::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a ChainError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ChainError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.underlying();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

fn trace_cause_change(previous: Option<&Cause>, current: Option<&Cause>, matchers: usize, location: Location) {
    if previous == current {
        return;
    }

    tracing::event!(
        name: "errchain.mask",
        tracing::Level::TRACE,
        previous = ?previous,
        current = ?current,
        matchers,
        location = %location,
        "cause changed while wrapping error",
    );
}
