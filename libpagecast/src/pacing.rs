//! Fixed random pacing between publish operations
//!
//! A uniformly random sleep keeps consecutive posts from landing on the
//! destination in a burst. This is not adaptive throttling; rate-limit
//! response headers are ignored.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

const DEFAULT_MIN_SECS: f64 = 2.0;
const DEFAULT_MAX_SECS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    pub fn new(min: Duration, max: Duration) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Pick a uniformly random delay in [min, max]
    pub fn delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Sleep for one randomly chosen delay
    pub async fn pause(&self) {
        sleep(self.delay()).await;
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(
            Duration::from_secs_f64(DEFAULT_MIN_SECS),
            Duration::from_secs_f64(DEFAULT_MAX_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_within_bounds() {
        let pacing = Pacing::default();
        for _ in 0..100 {
            let delay = pacing.delay();
            assert!(delay >= Duration::from_secs(2), "delay {:?} below minimum", delay);
            assert!(delay <= Duration::from_secs(5), "delay {:?} above maximum", delay);
        }
    }

    #[test]
    fn test_degenerate_range() {
        let pacing = Pacing::new(Duration::from_millis(10), Duration::from_millis(10));
        assert_eq!(pacing.delay(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_pause_sleeps_at_least_min() {
        let pacing = Pacing::new(Duration::from_millis(5), Duration::from_millis(15));
        let start = std::time::Instant::now();
        pacing.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
