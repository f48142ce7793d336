//! Mock price service for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::ports::PriceService;

/// Scripted quote configuration for one item code.
#[derive(Debug, Clone, Default)]
pub struct MockQuote {
    /// Price to return
    pub value: f64,
    /// Whether to simulate failure
    pub fail: bool,
    /// Error message if failing
    pub error_message: Option<String>,
}

impl MockQuote {
    /// Quote that succeeds with the given price.
    pub fn success(value: f64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// Quote that fails with the given error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            fail: true,
            error_message: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Mock price service for testing.
///
/// Tracks per-item and total call counts, and keeps an in-flight gauge with
/// a high-water mark so tests can assert how many lookups ran concurrently.
/// Unknown item codes fail, mirroring an upstream that has no quote.
pub struct MockPriceService {
    quotes: Arc<RwLock<HashMap<String, MockQuote>>>,
    one_shot_failures: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<HashMap<String, usize>>>,
    total_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    latency: RwLock<Duration>,
}

impl MockPriceService {
    /// Create an empty mock with no quotes and no latency.
    pub fn new() -> Self {
        Self {
            quotes: Arc::new(RwLock::new(HashMap::new())),
            one_shot_failures: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(HashMap::new())),
            total_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            latency: RwLock::new(Duration::ZERO),
        }
    }

    /// Script a successful quote for an item code.
    pub async fn set_price(&self, item_code: &str, value: f64) {
        let mut quotes = self.quotes.write().await;
        quotes.insert(item_code.to_string(), MockQuote::success(value));
    }

    /// Script an arbitrary quote for an item code.
    pub async fn set_quote(&self, item_code: &str, quote: MockQuote) {
        let mut quotes = self.quotes.write().await;
        quotes.insert(item_code.to_string(), quote);
    }

    /// Make every lookup for this item code fail.
    pub async fn fail_always(&self, item_code: &str, error: impl Into<String>) {
        self.set_quote(item_code, MockQuote::failure(error)).await;
    }

    /// Make only the next lookup for this item code fail; later lookups use
    /// the scripted quote (if any).
    pub async fn fail_next(&self, item_code: &str, error: impl Into<String>) {
        let mut failures = self.one_shot_failures.write().await;
        failures.insert(item_code.to_string(), error.into());
    }

    /// Simulated lookup latency, applied to every call.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }

    /// Number of lookups made for this item code.
    pub async fn call_count(&self, item_code: &str) -> usize {
        let calls = self.calls.read().await;
        calls.get(item_code).copied().unwrap_or(0)
    }

    /// Total number of lookups made across all item codes.
    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// High-water mark of concurrently running lookups.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record_call(&self, item_code: &str) {
        let mut calls = self.calls.write().await;
        *calls.entry(item_code.to_string()).or_insert(0) += 1;
        self.total_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn enter(&self) {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Default for MockPriceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceService for MockPriceService {
    async fn price_for(&self, item_code: &str) -> anyhow::Result<f64> {
        self.record_call(item_code).await;
        self.enter();

        let latency = *self.latency.read().await;
        if latency > Duration::ZERO {
            tokio::time::sleep(latency).await;
        }

        let result = {
            if let Some(error) = self.one_shot_failures.write().await.remove(item_code) {
                Err(anyhow::anyhow!(error))
            } else {
                let quotes = self.quotes.read().await;
                match quotes.get(item_code) {
                    Some(quote) if quote.fail => Err(anyhow::anyhow!(quote
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "scripted failure".to_string()))),
                    Some(quote) => Ok(quote.value),
                    None => Err(anyhow::anyhow!("no quote for item {item_code}")),
                }
            }
        };

        self.exit();
        result
    }
}
