//! Transparent read-through price cache.
//!
//! Wraps a [`PriceService`] and remembers the prices it returns, so repeated
//! lookups for the same item code within the freshness window never hit the
//! upstream service. Staleness is assessed at read time; entries are
//! overwritten on refresh and never evicted.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::PricePoint;
use crate::domain::ports::PriceService;

/// Transparent cache decorator over a [`PriceService`].
///
/// All concurrent callers share one freshness store. Two concurrent fetches
/// for the same absent or stale item code may both call the upstream service;
/// there is no single-flight deduplication and the last write wins. Both
/// callers still receive a valid value.
///
/// Cloning is cheap and every clone shares the same store, which is what the
/// batch workers rely on.
///
/// # Examples
///
/// ```no_run
/// use pricecache::{MockPriceService, PriceCache};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn example() -> anyhow::Result<()> {
/// let service = Arc::new(MockPriceService::new());
/// service.set_price("p1", 4.20).await;
///
/// let cache = PriceCache::new(service, Duration::from_secs(60));
/// let price = cache.fetch("p1").await?;
/// assert_eq!(price, 4.20);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PriceCache {
    service: Arc<dyn PriceService>,
    max_age: Duration,
    prices: Arc<RwLock<HashMap<String, PricePoint>>>,
    workers: usize,
}

impl PriceCache {
    /// Create a new cache in front of `service`.
    ///
    /// The batch worker pool is sized to the available hardware parallelism,
    /// with a minimum of one worker.
    ///
    /// # Arguments
    ///
    /// * `service` - Upstream price service to consult on misses
    /// * `max_age` - Maximum age a cached price may have before it is
    ///   considered stale. `Duration::ZERO` makes every read a miss.
    pub fn new(service: Arc<dyn PriceService>, max_age: Duration) -> Self {
        let workers = std::thread::available_parallelism()
            .map_or(1, NonZeroUsize::get);
        Self::with_workers(service, max_age, workers)
    }

    /// Create with an explicit batch worker pool size (clamped to >= 1).
    pub fn with_workers(service: Arc<dyn PriceService>, max_age: Duration, workers: usize) -> Self {
        Self {
            service,
            max_age,
            prices: Arc::new(RwLock::new(HashMap::new())),
            workers: workers.max(1),
        }
    }

    /// Number of workers `fetch_all` will run concurrently at most.
    pub const fn worker_count(&self) -> usize {
        self.workers
    }

    /// Get the price for an item, either from the cache or the upstream
    /// service if it was not cached or too old.
    ///
    /// On upstream failure the store is left untouched, so a later call for
    /// the same item code consults the upstream service again.
    ///
    /// # Arguments
    ///
    /// * `item_code` - Identifier of the item to price
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` - The cached or freshly fetched price
    /// * `Err(CacheError::Upstream)` - If the upstream lookup failed
    #[instrument(skip(self))]
    pub async fn fetch(&self, item_code: &str) -> CacheResult<f64> {
        if let Some(value) = self.lookup_fresh(item_code).await {
            debug!(item_code, value, "cache hit");
            return Ok(value);
        }

        let value = self
            .service
            .price_for(item_code)
            .await
            .map_err(|source| CacheError::Upstream {
                item_code: item_code.to_string(),
                source,
            })?;

        debug!(item_code, value, "cache miss, stored fresh price");
        let mut prices = self.prices.write().await;
        prices.insert(item_code.to_string(), PricePoint::now(value));
        Ok(value)
    }

    /// Look up a fresh cached price, if any.
    async fn lookup_fresh(&self, item_code: &str) -> Option<f64> {
        let prices = self.prices.read().await;
        prices
            .get(item_code)
            .filter(|point| point.is_fresh(self.max_age))
            .map(|point| point.value)
    }
}
