use std::time::Duration;

use wikipron_config::network::NetworkConfig;

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub backoff_factor: Duration,
    pub backoff_max: Duration,
}

impl RetryPolicy {
    pub fn from_config(network: &NetworkConfig) -> Self {
        Self {
            max_retries: network.max_retries,
            backoff_factor: network.backoff_factor(),
            backoff_max: network.backoff_max(),
        }
    }

    /// Sleep before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        backoff_delay(retry, self.backoff_factor, self.backoff_max)
    }

    /// Sleep before retry number `retry` when the server asked for `retry_after`
    pub fn delay(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(wait) => wait.min(self.backoff_max),
            None => self.backoff(retry),
        }
    }

    /// Worst-case time spent sleeping before giving up
    pub fn total_budget(&self) -> Duration {
        (1..=self.max_retries)
            .map(|retry| self.backoff(retry))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&NetworkConfig::default())
    }
}

/// `factor * 2^(retry - 1)`, saturating at `max`.
///
/// With the defaults (200ms, 120s) this gives 0.2s, 0.4s, 0.8s, ... 102.4s
/// over ten retries.
pub fn backoff_delay(retry: u32, factor: Duration, max: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry.saturating_sub(1));
    factor.saturating_mul(multiplier).min(max)
}
