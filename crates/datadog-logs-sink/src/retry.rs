// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Exponential backoff with jitter for delivery retries.
//!
//! Backoff gives the intake time to recover when it is overwhelmed; jitter
//! spreads the retries of many sink tasks so they do not arrive as a
//! synchronized wave.

use std::time::Duration;

/// Absolute cap on a single backoff wait.
pub const MAX_BACKOFF_MS: u64 = 10 * 60 * 1000;

// Shifting past this would discard bits; treat it as saturated.
const MAX_SHIFT_ATTEMPTS: u32 = 32;

/// Nominal backoff ceiling in milliseconds for the given retry attempt.
///
/// `attempts` is the 0-based count of retries already consumed, so the
/// ceiling doubles with each consecutive failure: `base_ms << attempts`,
/// saturating at [`MAX_BACKOFF_MS`].
#[must_use]
pub fn backoff_ceiling_ms(attempts: u32, base_ms: u64) -> u64 {
    if attempts > MAX_SHIFT_ATTEMPTS {
        return MAX_BACKOFF_MS;
    }
    base_ms
        .checked_mul(1u64 << attempts)
        .map_or(MAX_BACKOFF_MS, |ceiling| ceiling.min(MAX_BACKOFF_MS))
}

/// Actual wait before the next retry: uniformly random in
/// `[0, backoff_ceiling)`.
#[must_use]
pub fn jittered_backoff(attempts: u32, base_ms: u64) -> Duration {
    let ceiling = backoff_ceiling_ms(attempts, base_ms);
    if ceiling == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(fastrand::u64(0..ceiling))
}
