use std::collections::HashMap;
use std::sync::Arc;

use candela_core::{CandleProvider, CandleSeries, ChainId, Period, local_utc_offset_seconds};
use tokio::sync::{Mutex, watch};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::CacheConfig;

/// Cache key: one series per network, symbol, and period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartKey {
    /// Network identifier.
    pub chain: ChainId,
    /// Chart symbol as requested by the subscriber.
    pub symbol: String,
    /// Aggregation period.
    pub period: Period,
}

/// The cached base series for a key: absent until the first successful
/// fetch, then always the latest applied result.
pub(crate) type BaseSeries = Option<Arc<CandleSeries>>;

struct Entry {
    publisher: watch::Sender<BaseSeries>,
    last_attempt: Option<Instant>,
    in_flight: bool,
    /// Generation handed to the most recently issued fetch.
    generation: u64,
    /// Generation of the most recently applied result. The in-flight flag
    /// serializes fetches, so issued generations are strictly increasing
    /// today; the newest-wins check on apply is the backstop should fetches
    /// ever overlap, dropping any result tagged older than `applied`.
    applied: u64,
}

impl Entry {
    fn new() -> Self {
        let (publisher, _) = watch::channel(None);
        Self {
            publisher,
            last_attempt: None,
            in_flight: false,
            generation: 0,
            applied: 0,
        }
    }
}

struct Inner<S> {
    source: S,
    cfg: CacheConfig,
    tz_offset: i64,
    entries: Mutex<HashMap<ChartKey, Entry>>,
}

/// Per-key candle series cache with stale-while-revalidate semantics.
///
/// Guarantees, per key:
/// - at most one in-flight upstream fetch (single-flight);
/// - revalidation requests inside the deduping interval coalesce, unless
///   forced by a manual refresh;
/// - a fetch failure keeps the previously cached series and only logs;
/// - an older fetch result never replaces a newer one (generation counter).
///
/// `SeriesCache` is a cheap handle: clones share one store. Entries are
/// never evicted here; lifecycle beyond process memory is the embedding
/// runtime's concern.
pub struct SeriesCache<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for SeriesCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CandleProvider + 'static> SeriesCache<S> {
    /// Build a cache over `source` using the process-local display
    /// timezone offset.
    #[must_use]
    pub fn new(source: S, cfg: CacheConfig) -> Self {
        Self::with_tz_offset(source, cfg, local_utc_offset_seconds())
    }

    /// Build a cache with an explicit display offset (used in tests).
    #[must_use]
    pub fn with_tz_offset(source: S, cfg: CacheConfig, tz_offset: i64) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                cfg,
                tz_offset,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub(crate) fn tz_offset(&self) -> i64 {
        self.inner.tz_offset
    }

    /// Subscribe to the base series channel for `key`, creating the entry
    /// on first use.
    pub(crate) async fn watch_base(&self, key: &ChartKey) -> watch::Receiver<BaseSeries> {
        let mut entries = self.inner.entries.lock().await;
        entries
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .publisher
            .subscribe()
    }

    /// The current base series for `key`, if any fetch ever succeeded.
    pub async fn series(&self, key: &ChartKey) -> BaseSeries {
        let entries = self.inner.entries.lock().await;
        entries
            .get(key)
            .and_then(|e| e.publisher.borrow().clone())
    }

    /// Revalidate `key` against the upstream source.
    ///
    /// Returns without fetching when another fetch for the key is already
    /// in flight, or when the last attempt is within the deduping interval
    /// and `force` is false. On success the new series is published to all
    /// watchers; on failure the previous series is retained.
    ///
    /// Cancellation-safe: the fetch runs in its own task, so a caller that
    /// is dropped mid-await (an aborted refresh loop, a timed-out manual
    /// refresh) neither leaves the in-flight flag stuck nor loses the
    /// result once it lands.
    pub async fn revalidate(&self, key: &ChartKey, force: bool) {
        let generation = {
            let mut entries = self.inner.entries.lock().await;
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            if entry.in_flight {
                return;
            }
            if !force
                && let Some(at) = entry.last_attempt
                && at.elapsed() < self.inner.cfg.dedupe_interval
            {
                return;
            }
            entry.in_flight = true;
            entry.last_attempt = Some(Instant::now());
            entry.generation += 1;
            entry.generation
        };

        let cache = self.clone();
        let key = key.clone();
        let worker = tokio::spawn(async move {
            let result = cache
                .inner
                .source
                .candles(key.chain, &key.symbol, key.period)
                .await
                .and_then(CandleSeries::from_ascending);

            let mut entries = cache.inner.entries.lock().await;
            let Some(entry) = entries.get_mut(&key) else {
                return;
            };
            entry.in_flight = false;
            match result {
                Ok(series) if generation > entry.applied => {
                    entry.applied = generation;
                    debug!(
                        symbol = %key.symbol,
                        period = %key.period,
                        candles = series.len(),
                        "chart series refreshed"
                    );
                    entry.publisher.send_replace(Some(Arc::new(series)));
                }
                Ok(_) => {
                    debug!(
                        symbol = %key.symbol,
                        period = %key.period,
                        "discarding fetch result older than applied generation"
                    );
                }
                Err(err) => {
                    warn!(
                        source = cache.inner.source.name(),
                        symbol = %key.symbol,
                        period = %key.period,
                        error = %err,
                        "chart fetch failed, keeping previous series"
                    );
                }
            }
        });
        let _ = worker.await;
    }

    /// Background revalidation loop for one key, run by subscriptions.
    pub(crate) async fn run_refresh_loop(self, key: ChartKey) {
        loop {
            self.revalidate(&key, false).await;
            tokio::time::sleep(self.inner.cfg.refresh_interval).await;
        }
    }
}
