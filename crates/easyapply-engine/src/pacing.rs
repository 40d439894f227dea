//! Randomized pauses between page interactions.

use std::time::Duration;

use rand::Rng;

/// Sleeps for a uniformly random duration in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// Bounds are reordered when given inverted.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A pacer that never sleeps.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn next_delay(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), Duration::from_millis(2500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_within_bounds() {
        let pacer = Pacer::default();
        for _ in 0..200 {
            let d = pacer.next_delay();
            assert!(d >= Duration::from_millis(1500) && d <= Duration::from_millis(2500));
        }
    }

    #[test]
    fn test_inverted_bounds() {
        let pacer = Pacer::new(Duration::from_millis(30), Duration::from_millis(10));
        let d = pacer.next_delay();
        assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(30));
    }

    #[test]
    fn test_none_is_zero() {
        assert_eq!(Pacer::none().next_delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_advances_clock() {
        let pacer = Pacer::new(Duration::from_millis(100), Duration::from_millis(100));
        let start = tokio::time::Instant::now();
        pacer.pause().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }
}
