//! Cached price observations.

use std::time::Duration;
use tokio::time::Instant;

/// A price observed from the upstream service at a known instant.
///
/// Entries are overwritten on refresh and never deleted; staleness is
/// assessed at read time against the cache's configured maximum age, not
/// enforced by background eviction. Monotonic instants keep the freshness
/// math immune to wall-clock adjustments and let tests drive expiry with
/// `tokio::time::pause`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Price reported by the upstream service.
    pub value: f64,
    /// Instant of the last successful fetch for this item code.
    pub observed_at: Instant,
}

impl PricePoint {
    /// Record a price observed right now.
    pub fn now(value: f64) -> Self {
        Self {
            value,
            observed_at: Instant::now(),
        }
    }

    /// Whether this observation is still usable under the given maximum age.
    ///
    /// A zero `max_age` makes every observation stale, turning the cache
    /// into a pass-through.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.observed_at.elapsed() < max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fresh_within_max_age() {
        let point = PricePoint::now(9.99);
        assert!(point.is_fresh(Duration::from_secs(60)));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(point.is_fresh(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_at_max_age_boundary() {
        let point = PricePoint::now(9.99);
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!point.is_fresh(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_age_is_always_stale() {
        let point = PricePoint::now(1.0);
        assert!(!point.is_fresh(Duration::ZERO));
    }
}
