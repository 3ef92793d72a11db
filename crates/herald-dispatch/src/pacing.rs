//! Inter-send pacing policy

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

/// Randomized delay bounds around each send, in milliseconds.
///
/// Sending too fast against a real messaging backend risks throttling or
/// account suspension; both delays are load-bearing, not cosmetic. Tests
/// inject [`PacingPolicy::zero`] so nothing sleeps.
#[derive(Debug, Clone)]
pub struct PacingPolicy {
    pre_send_ms: RangeInclusive<u64>,
    post_send_ms: RangeInclusive<u64>,
}

impl PacingPolicy {
    pub fn new(pre_send_ms: RangeInclusive<u64>, post_send_ms: RangeInclusive<u64>) -> Self {
        Self {
            pre_send_ms,
            post_send_ms,
        }
    }

    /// No delays at all.
    pub fn zero() -> Self {
        Self::new(0..=0, 0..=0)
    }

    /// Delay to wait before attempting a destination.
    pub fn pre_send_delay(&self) -> Duration {
        Self::sample(&self.pre_send_ms)
    }

    /// Longer delay to wait after a destination, success or failure.
    pub fn post_send_delay(&self) -> Duration {
        Self::sample(&self.post_send_ms)
    }

    fn sample(range: &RangeInclusive<u64>) -> Duration {
        Duration::from_millis(rand::thread_rng().gen_range(range.clone()))
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::new(800..=2500, 2000..=6000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_bounds() {
        let policy = PacingPolicy::new(100..=200, 300..=400);

        for _ in 0..50 {
            let pre = policy.pre_send_delay().as_millis() as u64;
            let post = policy.post_send_delay().as_millis() as u64;
            assert!((100..=200).contains(&pre));
            assert!((300..=400).contains(&post));
        }
    }

    #[test]
    fn test_zero_never_sleeps() {
        let policy = PacingPolicy::zero();
        assert_eq!(policy.pre_send_delay(), Duration::ZERO);
        assert_eq!(policy.post_send_delay(), Duration::ZERO);
    }
}
