// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builds a retry policy from JSON configuration.

use errchain::ChainError;
use retrier::{ConfigError, RetryConfig};

fn main() -> Result<(), ConfigError> {
    let json = r#"{ "max_tries": 4, "timeout": "2s", "sleep": "20ms" }"#;
    let config: RetryConfig = match serde_json::from_str(json) {
        Ok(config) => config,
        Err(error) => {
            println!("invalid configuration: {error}");
            return Ok(());
        }
    };

    let policy = config.into_policy()?;
    println!("policy: {policy:?}");

    let result = policy.execute(|| Err::<(), _>(ChainError::new("service unavailable")));
    if let Err(error) = result {
        println!("gave up: {error}");
    }

    Ok(())
}
