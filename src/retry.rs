// Delay strategies for the token acquisition loop

use std::time::Duration;

pub trait BackoffStrategy: Send + Sync + 'static {
    // Delay to wait after the given failed attempt (1-based)
    fn delay_for(&self, attempt: u32) -> Duration;
}

// step × attempt: 500ms, 1000ms, 1500ms, ... with the default step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoff {
    pub step: Duration,
}

impl LinearBackoff {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl BackoffStrategy for LinearBackoff {
    fn delay_for(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt)
    }
}

// Retries immediately
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBackoff;

impl BackoffStrategy for NoBackoff {
    fn delay_for(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 500 ; "first retry")]
    #[test_case(2, 1000 ; "second retry")]
    #[test_case(3, 1500 ; "third retry")]
    fn test_linear_backoff_grows_with_attempt(attempt: u32, expected_ms: u64) {
        let backoff = LinearBackoff::default();
        assert_eq!(backoff.delay_for(attempt), Duration::from_millis(expected_ms));
    }

    #[test]
    fn test_linear_backoff_saturates() {
        let backoff = LinearBackoff::new(Duration::MAX);
        assert_eq!(backoff.delay_for(2), Duration::MAX);
    }

    #[test]
    fn test_no_backoff_is_zero() {
        assert_eq!(NoBackoff.delay_for(1), Duration::ZERO);
        assert_eq!(NoBackoff.delay_for(10), Duration::ZERO);
    }
}
