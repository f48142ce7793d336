//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interface the cache depends on:
//! - `PriceService`: upstream price lookup per item code
//!
//! The trait defines the contract that allows the domain to be independent
//! of any specific upstream implementation.

pub mod price_service;

pub use price_service::PriceService;
