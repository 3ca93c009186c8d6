// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use errchain::ChainError;

use crate::fn_wrapper::define_fn_wrapper;

define_fn_wrapper!(Checker(Fn(error: &ChainError) -> bool));
define_fn_wrapper!(AfterRetry(Fn(error: Option<&ChainError>)));
define_fn_wrapper!(AfterRetryLimit(Fn(error: &ChainError)));

impl Checker {
    pub(crate) fn any() -> Self {
        Self::new(crate::checkers::any)
    }
}

impl AfterRetry {
    pub(crate) fn noop() -> Self {
        Self::new(|_| {})
    }
}

impl AfterRetryLimit {
    pub(crate) fn noop() -> Self {
        Self::new(|_| {})
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let error = ChainError::new("boom");

        assert!(Checker::any().call(&error));
        AfterRetry::noop().call(Some(&error));
        AfterRetry::noop().call(None);
        AfterRetryLimit::noop().call(&error);
    }

    #[test]
    fn debug_names() {
        assert_eq!(format!("{:?}", Checker::any()), "Checker");
        assert_eq!(format!("{:?}", AfterRetry::noop()), "AfterRetry");
        assert_eq!(format!("{:?}", AfterRetryLimit::noop()), "AfterRetryLimit");
    }
}
