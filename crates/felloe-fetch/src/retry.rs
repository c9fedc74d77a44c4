use std::time::Duration;

/// Delay before retry number `retry_count` (0-indexed): `base * 2^retry_count`,
/// saturating instead of overflowing.
///
/// ```
/// use std::time::Duration;
/// use felloe_fetch::retry_delay;
///
/// assert_eq!(retry_delay(0, Duration::from_millis(100)), Duration::from_millis(100));
/// assert_eq!(retry_delay(2, Duration::from_millis(100)), Duration::from_millis(400));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}

/// How often and how patiently transient failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Total attempts is `max_retries + 1`.
    pub max_retries: u32,
    pub backoff:     Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff:     Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self { Self { max_retries, backoff } }

    pub fn none() -> Self { Self::new(0, Duration::ZERO) }

    pub fn delay(&self, retry_count: u32) -> Duration { retry_delay(retry_count, self.backoff) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles() {
        let base = Duration::from_millis(250);
        assert_eq!(retry_delay(0, base), Duration::from_millis(250));
        assert_eq!(retry_delay(1, base), Duration::from_millis(500));
        assert_eq!(retry_delay(2, base), Duration::from_secs(1));
        assert_eq!(retry_delay(3, base), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_delay_zero_base() {
        assert_eq!(retry_delay(10, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_retry_delay_saturates() {
        let huge = retry_delay(u32::MAX, Duration::from_secs(1));
        assert_eq!(huge, Duration::from_secs(1).saturating_mul(u32::MAX));
        assert_eq!(retry_delay(40, Duration::MAX), Duration::MAX);
    }

    #[test]
    fn test_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.delay(1), Duration::from_millis(500));
        assert_eq!(RetryPolicy::none().max_retries, 0);
    }
}
