//! Pricecache - Read-Through TTL Price Cache
//!
//! Pricecache is a transparent caching layer in front of an expensive,
//! possibly-failing price lookup service. Values are remembered per item code
//! and served from memory as long as they are younger than a configured
//! maximum age; batch retrieval fans lookups out across a bounded pool of
//! concurrent workers while preserving the caller's input order exactly.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error taxonomy, and the
//!   `PriceService` port the cache depends on
//! - **Application Layer** (`application`): The cache itself and the batch
//!   coordination logic
//! - **Adapters** (`adapters`): In-crate test doubles for the port
//!
//! # Example
//!
//! ```no_run
//! use pricecache::{PriceCache, PriceService};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! async fn example(service: Arc<dyn PriceService>) -> anyhow::Result<()> {
//!     let cache = PriceCache::new(service, Duration::from_secs(60));
//!
//!     let single = cache.fetch("p1").await?;
//!     let batch = cache
//!         .fetch_all(&["p1".to_string(), "p2".to_string(), "p1".to_string()])
//!         .await?;
//!     assert_eq!(batch.len(), 3);
//!     assert_eq!(batch[0], single);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod domain;

// Re-export commonly used types for convenience
pub use adapters::{MockPriceService, MockQuote};
pub use application::PriceCache;
pub use domain::errors::{CacheError, CacheResult};
pub use domain::models::PricePoint;
pub use domain::ports::PriceService;
