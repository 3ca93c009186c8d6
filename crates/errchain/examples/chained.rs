// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wraps an I/O failure through several layers and inspects the resulting chain.

use errchain::{ChainError, Details, Matcher, ResultExt, Sentinel};

static MISSING_CONFIG: Sentinel = errchain::sentinel!("configuration is missing");

fn read_file(path: &str) -> Result<String, ChainError> {
    std::fs::read_to_string(path).note_err(format!("reading {path}"))
}

fn load_config() -> Result<String, ChainError> {
    read_file("/nonexistent/app.toml").with_cause_err(&MISSING_CONFIG, "loading configuration")
}

fn start() -> Result<(), ChainError> {
    let _config = load_config().mask_err(&[Matcher::is(&MISSING_CONFIG)])?;
    Ok(())
}

fn main() {
    let Err(error) = start() else {
        println!("unexpectedly started");
        return;
    };

    println!("error:   {error}");
    println!("missing: {}", error.cause_is(&MISSING_CONFIG));
    println!("details: {}", error.details());
    println!("causes:  {}", Details::new(Some(&error)).with_causes());
}
