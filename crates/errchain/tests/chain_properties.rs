// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

use errchain::{ChainError, Matcher, ResultExt, Sentinel, details, is_max_retries_reached, is_timeout};
use regex::Regex;
use rstest::rstest;

static CONFLICT: Sentinel = errchain::sentinel!("version conflict");
static UNAVAILABLE: Sentinel = errchain::sentinel!("service unavailable");

#[derive(Debug, thiserror::Error)]
#[error("quota exceeded for {tenant}")]
struct QuotaError {
    tenant: String,
}

fn quota(tenant: &str) -> ChainError {
    ChainError::foreign(QuotaError { tenant: tenant.to_string() })
}

#[rstest]
#[case::timeout(&errchain::TIMEOUT_ERROR)]
#[case::max_retries(&errchain::MAX_RETRIES_REACHED_ERROR)]
#[case::user_sentinel(&CONFLICT)]
fn mask_with_matching_sentinel_keeps_cause(#[case] sentinel: &'static Sentinel) {
    let error = ChainError::mask(sentinel, &[Matcher::is(sentinel)]);

    assert!(error.cause_is(sentinel));
    assert_eq!(error.cause().unwrap(), *sentinel);
}

#[rstest]
#[case::other_sentinel(ChainError::from(&UNAVAILABLE))]
#[case::plain_record(ChainError::new("plain"))]
#[case::foreign(quota("contoso"))]
fn mask_with_other_sentinel_drops_cause_but_keeps_text(#[case] error: ChainError) {
    let text = error.to_string();
    let masked = ChainError::mask(error, &[Matcher::is(&CONFLICT)]);

    assert!(masked.cause().is_none());
    assert!(details(Some(&masked)).contains(&text));
    assert_eq!(masked.to_string(), text);
}

#[test]
fn timeout_survives_nested_masks() {
    let inner = ChainError::mask(&errchain::TIMEOUT_ERROR, &[Matcher::Any]);
    let outer = ChainError::mask(inner, &[Matcher::is(&errchain::TIMEOUT_ERROR)]);

    assert!(is_timeout(&outer));
    assert!(!is_max_retries_reached(&outer));
}

#[test]
fn note_drops_classification_with_cause_restores_it() {
    let noted = ChainError::note(ChainError::from(&CONFLICT), "saving");
    assert!(noted.cause().is_none());

    let reclassified = ChainError::with_cause(noted, &UNAVAILABLE, "request");
    assert!(reclassified.cause_is(&UNAVAILABLE));
    assert_eq!(reclassified.to_string(), "request: saving: version conflict");
}

#[test]
fn foreign_error_is_its_own_cause() {
    let error = quota("fabrikam");
    let masked = Err::<(), _>(error).mask_err(&[Matcher::Any]).unwrap_err();

    let cause = masked.cause().unwrap();
    assert_eq!(cause.to_string(), "quota exceeded for fabrikam");
    assert!(cause.as_error().downcast_ref::<QuotaError>().is_some());
    assert!(cause.sentinel().is_none());
}

#[test]
fn details_of_absent_error() {
    assert_eq!(details(None), "[]");
}

#[test]
fn details_contains_location_and_message() {
    let error = ChainError::new("x");
    let rendered = details(Some(&error));

    let pattern = Regex::new(r"^\[\{[^{}]*chain_properties\.rs:\d+: x\}\]$").unwrap();
    assert!(pattern.is_match(&rendered), "unexpected details: {rendered}");
}

#[test]
fn details_lists_every_layer() {
    let error = ChainError::note(ChainError::mask(quota("contoso"), &[]), "billing");
    let rendered = details(Some(&error));

    let pattern = Regex::new(r"^\[\{[^{}]+: billing\} \{[^{}]+: \} \{quota exceeded for contoso\}\]$").unwrap();
    assert!(pattern.is_match(&rendered), "unexpected details: {rendered}");
}

#[test]
fn display_of_empty_record() {
    assert_eq!(ChainError::builder().build().to_string(), "<no error>");
}

#[test]
fn boxed_chain_error_is_not_rewrapped() {
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(ChainError::from(&CONFLICT));
    let error = ChainError::from(boxed);

    assert!(error.cause_is(&CONFLICT));
    assert!(error.underlying().is_none());
}

#[test]
fn chain_walks_outermost_to_innermost() {
    let error = errchain::note_err!(ChainError::mask(&CONFLICT, &[Matcher::Any]), "attempt {}", 3);

    let texts: Vec<_> = error.chain().map(ToString::to_string).collect();
    assert_eq!(texts, ["attempt 3: version conflict", "version conflict", "version conflict"]);
    assert_eq!(error.root().message(), Some("version conflict"));
}
