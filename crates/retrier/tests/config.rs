// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "serde")]
#![expect(missing_docs, reason = "Test code")]

use std::time::Duration;

use errchain::ChainError;
use retrier::{ConfigError, RetryConfig, RetryPolicy};

#[test]
fn policy_from_json_config() {
    let config: RetryConfig = serde_json::from_str(r#"{ "max_tries": 2, "timeout": "0s", "sleep": "1ms" }"#).unwrap();
    let policy = RetryPolicy::from_config(&config).unwrap();

    assert_eq!(policy.get_timeout(), None);
    assert_eq!(policy.get_sleep(), Duration::from_millis(1));

    let error = policy.execute(|| Err::<(), _>(ChainError::new("down"))).unwrap_err();
    assert_eq!(error.to_string(), "retry limit reached (2/2): down");
}

#[test]
fn empty_config_uses_defaults() {
    let config: RetryConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, RetryConfig::default());
}

#[test]
fn invalid_config_is_reported() {
    let config: RetryConfig = serde_json::from_str(r#"{ "max_tries": 0 }"#).unwrap();

    let error = config.into_policy().unwrap_err();
    assert_eq!(error, ConfigError::ZeroMaxTries);
    assert_eq!(error.to_string(), "max_tries must be at least 1");
}
