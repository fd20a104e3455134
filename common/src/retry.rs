// Retry strategy for the polling driver

use std::time::Duration;

/// Retry strategy trait for calculating retry delays
pub trait RetryStrategy: Send + Sync {
    /// Delay before the next attempt, where `attempt` counts completed
    /// failed attempts (1-based). Returns None once the attempt budget
    /// is exhausted.
    fn next_delay(&self, attempt: u32) -> Option<Duration>;

    /// Total number of attempts allowed, including the first.
    fn max_attempts(&self) -> u32;
}

/// Fixed delay between a bounded number of attempts.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
    max_attempts: u32,
}

impl FixedDelay {
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl RetryStrategy for FixedDelay {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        Some(self.delay)
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_sequence() {
        let strategy = FixedDelay::new(Duration::from_secs(3), 3);

        // After attempts 1 and 2 there is another try; after 3 there is not
        assert_eq!(strategy.next_delay(1), Some(Duration::from_secs(3)));
        assert_eq!(strategy.next_delay(2), Some(Duration::from_secs(3)));
        assert_eq!(strategy.next_delay(3), None);
        assert_eq!(strategy.next_delay(4), None);
    }

    #[test]
    fn test_max_attempts_floor() {
        let strategy = FixedDelay::new(Duration::from_secs(1), 0);
        assert_eq!(strategy.max_attempts(), 1);
        assert_eq!(strategy.next_delay(1), None);
    }
}
