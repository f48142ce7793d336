//! Application layer: the cache and its batch coordination logic.

pub mod batch_coordinator;
pub mod price_cache;

pub use price_cache::PriceCache;
