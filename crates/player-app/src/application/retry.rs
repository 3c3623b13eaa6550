//! Retry policy for server errors
//!
//! Exponential backoff with jitter: `base * 2^(attempt-1)`, capped at
//! `max_delay_ms`, then randomized by ±`jitter_factor`.

use rand::Rng;

/// Default number of attempts (initial try included)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first one (1 = no retries)
    pub max_attempts: u32,
    /// Base delay in milliseconds before the first retry
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) for randomizing delays
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: 500,
            max_delay_ms: 5_000,
            jitter_factor: 0.2,
        }
    }
}

impl RetryConfig {
    /// No waiting between attempts (tests)
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_ms: 0,
            max_delay_ms: 0,
            jitter_factor: 0.0,
        }
    }

    /// Delay before the retry that follows failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> u64 {
        let exponential = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exponential.min(self.max_delay_ms);

        let jitter_range = (capped as f64 * self.jitter_factor.clamp(0.0, 1.0)) as i64;
        if jitter_range > 0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (capped as i64 + jitter).max(0) as u64
        } else {
            capped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryConfig {
        RetryConfig {
            max_attempts: 5,
            base_delay_ms: 500,
            max_delay_ms: 5_000,
            jitter_factor: 0.0,
        }
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let config = no_jitter();

        assert_eq!(config.delay_for(1), 500);
        assert_eq!(config.delay_for(2), 1_000);
        assert_eq!(config.delay_for(3), 2_000);
        assert_eq!(config.delay_for(4), 4_000);
    }

    #[test]
    fn delay_is_capped() {
        let config = no_jitter();

        assert_eq!(config.delay_for(5), 5_000);
        assert_eq!(config.delay_for(40), 5_000);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let config = RetryConfig {
            jitter_factor: 0.2,
            ..no_jitter()
        };

        for _ in 0..100 {
            let delay = config.delay_for(2);
            assert!((800..=1_200).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn immediate_never_waits() {
        let config = RetryConfig::immediate(3);
        assert_eq!(config.delay_for(1), 0);
        assert_eq!(config.delay_for(3), 0);
    }
}
