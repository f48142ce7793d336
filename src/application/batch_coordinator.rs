//! Batch price retrieval with a bounded worker pool.
//!
//! Fans a batch of item codes out across worker tasks that share a FIFO job
//! queue, then fans the results back into a position-indexed buffer so the
//! output order always matches the input order, no matter how the workers
//! interleave. The first failure aborts the batch: remaining queued jobs are
//! never started, in-flight lookups run to completion and their results are
//! discarded.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::{debug, instrument, warn};

use crate::domain::errors::{CacheError, CacheResult};

use super::price_cache::PriceCache;

/// Worker completion event.
#[derive(Debug)]
enum WorkerEvent {
    /// Worker priced the item at the given input position.
    Priced { pos: usize, value: f64 },
    /// Worker failed a lookup; the whole batch aborts.
    Failed(CacheError),
}

impl PriceCache {
    /// Get the prices for several items at once, some might be found in the
    /// cache, others might not.
    ///
    /// The result sequence has the same length as `item_codes` and
    /// `result[i]` holds the price for `item_codes[i]`, regardless of the
    /// order in which the concurrent lookups complete. Duplicated item codes
    /// are each resolved independently against the cache.
    ///
    /// If any single lookup fails, the first observed error is returned and
    /// all successful values are discarded; callers get either a complete
    /// sequence or an error, never a partial result. Lookups that succeeded
    /// before the failure may still have warmed the cache.
    ///
    /// # Arguments
    ///
    /// * `item_codes` - Ordered item codes to price (duplicates allowed)
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<f64>)` - One price per input position, in input order
    /// * `Err(CacheError::Batch)` - Wrapping the first lookup failure
    #[instrument(skip_all, fields(items = item_codes.len()))]
    pub async fn fetch_all(&self, item_codes: &[String]) -> CacheResult<Vec<f64>> {
        if item_codes.is_empty() {
            return Ok(Vec::new());
        }

        let total = item_codes.len();
        let workers = self.worker_count().min(total);

        // All jobs are queued up front; workers drain the queue FIFO.
        let queue: VecDeque<(usize, String)> = item_codes
            .iter()
            .enumerate()
            .map(|(pos, code)| (pos, code.clone()))
            .collect();
        let queue = Arc::new(Mutex::new(queue));

        // Capacity covers one event per job, so worker sends never block
        // even when the coordinator has already returned.
        let (event_tx, mut event_rx) = mpsc::channel::<WorkerEvent>(total);
        let (abort_tx, abort_rx) = watch::channel(false);

        for _ in 0..workers {
            spawn_worker(
                self.clone(),
                Arc::clone(&queue),
                event_tx.clone(),
                abort_rx.clone(),
            );
        }
        // Only the workers hold senders; the channel closes when they exit.
        drop(event_tx);

        // Aggregate into a position-indexed buffer, independent of
        // completion order.
        let mut results: Vec<Option<f64>> = vec![None; total];
        let mut filled = 0;

        while filled < total {
            let Some(event) = event_rx.recv().await else {
                break;
            };
            match event {
                WorkerEvent::Priced { pos, value } => {
                    results[pos] = Some(value);
                    filled += 1;
                }
                WorkerEvent::Failed(err) => {
                    warn!(item_code = err.item_code(), "aborting batch on first lookup failure");
                    // Workers still polling the queue stop before their next
                    // job; in-flight lookups finish and are discarded.
                    let _ = abort_tx.send(true);
                    return Err(CacheError::Batch(Box::new(err)));
                }
            }
        }

        let values: Vec<f64> = results.into_iter().flatten().collect();
        if values.len() == total {
            debug!(items = total, workers, "batch completed");
            Ok(values)
        } else {
            // Only reachable if a worker task died without reporting.
            Err(CacheError::Batch(Box::new(CacheError::Upstream {
                item_code: String::new(),
                source: anyhow::anyhow!(
                    "worker pool shut down with {} of {} positions filled",
                    values.len(),
                    total
                ),
            })))
        }
    }
}

/// Spawn one worker that drains the shared job queue until it is empty, the
/// batch has been aborted, or the coordinator stopped listening.
fn spawn_worker(
    cache: PriceCache,
    queue: Arc<Mutex<VecDeque<(usize, String)>>>,
    event_tx: mpsc::Sender<WorkerEvent>,
    abort_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        loop {
            if *abort_rx.borrow() {
                debug!("worker stopping: batch aborted");
                break;
            }

            let job = queue.lock().await.pop_front();
            let Some((pos, item_code)) = job else {
                break;
            };

            match cache.fetch(&item_code).await {
                Ok(value) => {
                    // A closed channel means the coordinator already
                    // returned; nothing left to report.
                    if event_tx.send(WorkerEvent::Priced { pos, value }).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = event_tx.send(WorkerEvent::Failed(err)).await;
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockPriceService;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_batch_returns_empty() {
        let service = Arc::new(MockPriceService::new());
        let cache = PriceCache::new(service.clone(), Duration::from_secs(60));

        let values = cache.fetch_all(&[]).await.unwrap();
        assert!(values.is_empty());
        assert_eq!(service.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let service = Arc::new(MockPriceService::new());
        service.set_price("p1", 1.0).await;
        service.set_price("p2", 2.0).await;
        service.set_price("p3", 3.0).await;
        let cache = PriceCache::new(service.clone(), Duration::from_secs(60));

        let codes: Vec<String> = ["p3", "p1", "p2", "p1"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let values = cache.fetch_all(&codes).await.unwrap();
        assert_eq!(values, vec![3.0, 1.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_batch_failure_wraps_first_error() {
        let service = Arc::new(MockPriceService::new());
        service.set_price("p1", 1.0).await;
        service.fail_always("p2", "no quote").await;
        let cache = PriceCache::new(service.clone(), Duration::from_secs(60));

        let codes: Vec<String> = ["p1", "p2"].iter().map(ToString::to_string).collect();
        let err = cache.fetch_all(&codes).await.unwrap_err();
        assert!(matches!(err, CacheError::Batch(_)));
        assert_eq!(err.item_code(), "p2");
    }
}
