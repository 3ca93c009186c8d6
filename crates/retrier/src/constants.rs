// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// Default number of attempts made by [`RetryPolicy::execute`](crate::RetryPolicy::execute): 3.
///
/// This counts every call of the operation, including the first one.
pub const DEFAULT_MAX_TRIES: u32 = 3;

/// Default overall time budget of [`RetryPolicy::execute`](crate::RetryPolicy::execute): 15 seconds.
///
/// The budget is only checked before each attempt. An attempt that is already running is
/// never interrupted.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default delay between attempts: none.
pub const DEFAULT_SLEEP: Duration = Duration::ZERO;
