//! Property-based tests for batch retrieval.
//!
//! For arbitrary item-code sequences (duplicates and empty included), the
//! batch result must be slot-stable: same length as the input, with every
//! position carrying the price of the item code requested there.

use pricecache::{MockPriceService, PriceCache};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Deterministic price for a known item code.
fn price_of(code: &str) -> f64 {
    match code {
        "a" => 1.25,
        "b" => 2.50,
        "c" => 3.75,
        "d" => 5.00,
        _ => 6.25,
    }
}

proptest! {
    #[test]
    fn prop_batch_is_slot_stable(codes in proptest::collection::vec("[a-e]", 0..32)) {
        tokio_test::block_on(async {
            let service = Arc::new(MockPriceService::new());
            for code in ["a", "b", "c", "d", "e"] {
                service.set_price(code, price_of(code)).await;
            }

            let cache = PriceCache::new(service.clone(), Duration::from_secs(60));
            let values = cache.fetch_all(&codes).await.unwrap();

            prop_assert_eq!(values.len(), codes.len());
            for (code, value) in codes.iter().zip(&values) {
                prop_assert_eq!(price_of(code), *value);
            }

            // Cache hits can only reduce upstream traffic: never more calls
            // than requests, never fewer than distinct item codes.
            let distinct: HashSet<&String> = codes.iter().collect();
            prop_assert!(service.total_calls() <= codes.len());
            prop_assert!(service.total_calls() >= distinct.len());
            Ok(())
        })?;
    }
}
