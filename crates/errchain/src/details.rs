// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Write};

use crate::{Cause, ChainError, Location};

/// Renders an error chain as a bracketed diagnostic string.
///
/// Every link of the chain becomes one brace-delimited entry, outermost first. An entry holds
/// the origin location (when known) followed by `": "` and the message of the link. A foreign
/// error has no message capability, so its text is emitted instead and rendering stops there.
/// Entries are separated by a single space and the whole sequence is wrapped in `[` and `]`.
///
/// The output is stable and meant to be consumed by logs and tests:
///
/// ```text
/// [{src/fetch.rs:40: fetching profile} {src/fetch.rs:12: } {connection reset}]
/// ```
///
/// # Examples
///
/// ```rust
/// use errchain::{ChainError, Details, Location, Matcher, TIMEOUT_ERROR};
///
/// let error = ChainError::builder()
///     .message("loading")
///     .underlying(ChainError::mask(&TIMEOUT_ERROR, &[Matcher::Any]))
///     .cause(&TIMEOUT_ERROR)
///     .location(Location::new("main.rs", 3))
///     .build();
///
/// let plain = Details::new(Some(&error)).without_locations().to_string();
/// assert_eq!(plain, "[{loading} {} {Operation aborted. Timeout occured}]");
///
/// let deep = Details::new(Some(&error)).without_locations().with_causes().to_string();
/// assert!(deep.starts_with("[{loading=sentinel[{Operation aborted. Timeout occured}]}"));
///
/// assert_eq!(Details::new(None).to_string(), "[]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Details<'a> {
    error: Option<&'a ChainError>,
    locations: bool,
    causes: bool,
}

impl<'a> Details<'a> {
    /// Creates a renderer for the given chain. An absent chain renders as `[]`.
    #[must_use]
    pub const fn new(error: Option<&'a ChainError>) -> Self {
        Self {
            error,
            locations: true,
            causes: false,
        }
    }

    /// Also renders the explicit cause of every link, as `=<kind>[<cause entry>]` right after
    /// the message. `kind` is `sentinel` or `error`.
    #[must_use]
    pub const fn with_causes(mut self) -> Self {
        self.causes = true;
        self
    }

    /// Omits location prefixes, which makes the output independent of source positions.
    #[must_use]
    pub const fn without_locations(mut self) -> Self {
        self.locations = false;
        self
    }

    fn write_location(&self, f: &mut fmt::Formatter<'_>, location: Option<&Location>) -> fmt::Result {
        match location {
            Some(location) if self.locations => write!(f, "{location}: "),
            _ => Ok(()),
        }
    }

    fn write_cause(&self, f: &mut fmt::Formatter<'_>, cause: &Cause) -> fmt::Result {
        write!(f, "={}[{{", cause.kind())?;
        if cause.sentinel().is_some() {
            self.write_location(f, cause.location())?;
        }
        write!(f, "{cause}}}]")
    }
}

impl Display for Details<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(error) = self.error else {
            return f.write_str("[]");
        };

        f.write_char('[')?;
        for (index, link) in error.chain().enumerate() {
            if index > 0 {
                f.write_char(' ')?;
            }

            f.write_char('{')?;
            self.write_location(f, link.location())?;
            match link.message() {
                Some(message) => f.write_str(message)?,
                None => write!(f, "{link}")?,
            }
            if self.causes
                && let Some(cause) = link.stored_cause()
            {
                self.write_cause(f, cause)?;
            }
            f.write_char('}')?;
        }
        f.write_char(']')
    }
}

/// Renders an optional error chain with the default [`Details`] settings.
///
/// Returns `"[]"` when no error is given.
#[must_use]
pub fn details(error: Option<&ChainError>) -> String {
    Details::new(error).to_string()
}
