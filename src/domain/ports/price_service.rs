//! Upstream price lookup port.

use anyhow::Result;
use async_trait::async_trait;

/// Port for upstream price lookup following hexagonal architecture
///
/// Calls to the implementing service are expected to be expensive (they take
/// time) and may fail. The cache never retries a failed lookup on behalf of
/// the caller. Duplicate calls for the same item code are assumed harmless
/// beyond their cost, so the cache makes no single-flight guarantee.
///
/// # Examples
///
/// ```no_run
/// use pricecache::PriceService;
/// use anyhow::Result;
///
/// async fn example(service: &dyn PriceService) -> Result<()> {
///     let price = service.price_for("p1").await?;
///     println!("p1 costs {price}");
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Look up the current price for a single item code.
    ///
    /// # Arguments
    ///
    /// * `item_code` - Identifier of the item to price
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` - The current price
    /// * `Err` - If the lookup failed
    async fn price_for(&self, item_code: &str) -> Result<f64>;
}
