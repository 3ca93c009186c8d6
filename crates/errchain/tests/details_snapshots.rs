// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

use std::io;

use errchain::{ChainError, Details, Location, MAX_RETRIES_REACHED_ERROR, Sentinel};
use insta::assert_snapshot;

static DECLARED: Sentinel = Sentinel::located("declared sentinel", Location::new("sentinels.rs", 1));

fn at(line: u32) -> Location {
    Location::new("service.rs", line)
}

fn retried_request() -> ChainError {
    let attempt = ChainError::builder()
        .message("GET /profile")
        .underlying(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
        .location(at(10))
        .build();

    ChainError::builder()
        .message("retry limit reached (3/3)")
        .underlying(attempt)
        .cause(&DECLARED)
        .location(at(20))
        .build()
}

#[test]
fn details_default() {
    assert_snapshot!(
        retried_request().details(),
        @"[{service.rs:20: retry limit reached (3/3)} {service.rs:10: GET /profile} {connection reset}]"
    );
}

#[test]
fn details_with_causes() {
    let error = retried_request();
    assert_snapshot!(
        Details::new(Some(&error)).with_causes().to_string(),
        @"[{service.rs:20: retry limit reached (3/3)=sentinel[{sentinels.rs:1: declared sentinel}]} {service.rs:10: GET /profile} {connection reset}]"
    );
}

#[test]
fn debug_formats() {
    let error = retried_request();

    assert_snapshot!(
        format!("{error:?}"),
        @"[{service.rs:20: retry limit reached (3/3)} {service.rs:10: GET /profile} {connection reset}]"
    );
    assert_snapshot!(
        format!("{error:#?}"),
        @"[{service.rs:20: retry limit reached (3/3)=sentinel[{sentinels.rs:1: declared sentinel}]} {service.rs:10: GET /profile} {connection reset}]"
    );
}

#[test]
fn display_joins_messages() {
    assert_snapshot!(retried_request(), @"retry limit reached (3/3): GET /profile: connection reset");
}

#[test]
fn foreign_cause_without_locations() {
    let error = ChainError::builder()
        .message("outer")
        .underlying(ChainError::builder().message("inner").no_location().build())
        .cause(&MAX_RETRIES_REACHED_ERROR)
        .no_location()
        .build();

    assert_snapshot!(
        Details::new(Some(&error)).without_locations().with_causes().to_string(),
        @"[{outer=sentinel[{Operation aborted. Too many errors.}]} {inner}]"
    );
}
