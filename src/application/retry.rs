//! Part Upload Retry Policy
//!
//! パートアップロードのリトライ回数と待ち時間

use std::time::Duration;

pub const MAX_RETRIES: u32 = 5;
pub const INITIAL_RETRY_DELAY_MS: u64 = 1000; // 1 second
pub const MAX_RETRY_DELAY_MS: u64 = 32000; // 32 seconds max

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay_ms,
            max_delay_ms,
        }
    }

    /// Total attempts allowed for a single part
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before the `retry_count`-th retry (1-based)
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        Duration::from_millis(calculate_retry_delay(
            retry_count,
            self.initial_delay_ms,
            self.max_delay_ms,
        ))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, INITIAL_RETRY_DELAY_MS, MAX_RETRY_DELAY_MS)
    }
}

/// Calculate retry delay with exponential backoff
pub fn calculate_retry_delay(retry_count: u32, initial_delay_ms: u64, max_delay_ms: u64) -> u64 {
    let exponent = retry_count.saturating_sub(1).min(63);
    let factor = 1u64 << exponent;
    std::cmp::min(initial_delay_ms.saturating_mul(factor), max_delay_ms)
}
