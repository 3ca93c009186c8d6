// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::RetryPolicy;
use crate::constants::{DEFAULT_MAX_TRIES, DEFAULT_SLEEP, DEFAULT_TIMEOUT};

/// Serializable settings of a [`RetryPolicy`].
///
/// Durations use [`SignedDuration`], so they can be written either in ISO 8601 (`"PT15S"`)
/// or in the friendly format (`"15s"`, `"1m 30s"`). Missing fields take their defaults.
///
/// Hooks and checkers cannot be expressed in configuration: a policy built from a config
/// retries every failure and has no hooks. Set them on the returned policy as needed.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use retrier::RetryConfig;
///
/// let config: RetryConfig = serde_json::from_str(r#"{ "max_tries": 5, "sleep": "250ms" }"#).unwrap();
/// let policy = config.into_policy().unwrap();
///
/// assert_eq!(policy.get_max_tries(), 5);
/// assert_eq!(policy.get_sleep(), Duration::from_millis(250));
/// assert_eq!(policy.get_timeout(), Some(Duration::from_secs(15)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one. Must not be zero.
    pub max_tries: u32,
    /// Overall time budget. Zero or a negative value disables it.
    pub timeout: SignedDuration,
    /// Delay between attempts. Must not be negative.
    pub sleep: SignedDuration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            timeout: signed(DEFAULT_TIMEOUT),
            sleep: signed(DEFAULT_SLEEP),
        }
    }
}

impl RetryConfig {
    /// Validates the configuration and builds a policy from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxTries`] if `max_tries` is zero and
    /// [`ConfigError::NegativeSleep`] if `sleep` is negative.
    pub fn into_policy(self) -> Result<RetryPolicy, ConfigError> {
        if self.max_tries == 0 {
            return Err(ConfigError::ZeroMaxTries);
        }

        if self.sleep.is_negative() {
            return Err(ConfigError::NegativeSleep(self.sleep));
        }

        let timeout = if self.timeout.is_positive() {
            self.timeout.unsigned_abs()
        } else {
            Duration::ZERO
        };

        Ok(RetryPolicy::new()
            .max_tries(self.max_tries)
            .timeout(timeout)
            .sleep(self.sleep.unsigned_abs()))
    }
}

impl RetryPolicy {
    /// Builds a policy from a [`RetryConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_config(config: &RetryConfig) -> Result<Self, ConfigError> {
        config.into_policy()
    }
}

/// An invalid [`RetryConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub enum ConfigError {
    /// `max_tries` is zero, so the operation would never run.
    #[error("max_tries must be at least 1")]
    ZeroMaxTries,

    /// `sleep` is negative.
    #[error("sleep must not be negative, got {0}")]
    NegativeSleep(SignedDuration),
}

fn signed(duration: Duration) -> SignedDuration {
    SignedDuration::try_from(duration).unwrap_or(SignedDuration::MAX)
}
