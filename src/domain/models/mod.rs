//! Domain models shared across the cache and batch coordinator.

pub mod price;

pub use price::PricePoint;
