//! Adapters for the `PriceService` port.
//!
//! The crate itself ships no production adapter; those live with the
//! packaging around this core. The mock adapter is exported for tests and
//! downstream consumers that need a scriptable upstream.

pub mod mock;

pub use mock::{MockPriceService, MockQuote};
