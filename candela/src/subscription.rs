use candela_core::{
    Candle, CandleProvider, ChainId, Period, append_current_average_price, fill_gaps,
    stable_series,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::{BaseSeries, ChartKey, SeriesCache};

/// What a subscriber wants to chart.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    /// Network identifier.
    pub chain: ChainId,
    /// Chart symbol (wrapped tickers are normalized by the data sources).
    pub symbol: String,
    /// Aggregation period.
    pub period: Period,
    /// True for pegged assets: the series is synthesized flat at 1.0 and
    /// the feed is never queried.
    pub stable: bool,
    /// Current on-chain average price, merged into the tail candle of every
    /// snapshot when present.
    pub current_average_price: Option<f64>,
}

impl ChartRequest {
    fn key(&self) -> ChartKey {
        ChartKey {
            chain: self.chain,
            symbol: self.symbol.clone(),
            period: self.period,
        }
    }
}

impl<S: CandleProvider + 'static> SeriesCache<S> {
    /// Attach a subscriber to `(chain, symbol, period)`.
    ///
    /// Non-stable subscriptions trigger an immediate (dedupe-gated)
    /// revalidation and keep a background timer revalidating at the
    /// configured refresh interval. Dropping the subscription stops its
    /// timer; the cache entry stays, shared with other subscribers.
    pub async fn subscribe(&self, request: ChartRequest) -> ChartSubscription<S> {
        if request.stable {
            // Keep the sender alive so the channel never reports closure;
            // a stable series has nothing to publish.
            let (tx, rx) = watch::channel(None);
            return ChartSubscription {
                request,
                cache: self.clone(),
                rx,
                refresher: None,
                _stable_publisher: Some(tx),
            };
        }

        let key = request.key();
        let rx = self.watch_base(&key).await;
        let refresher = tokio::spawn(self.clone().run_refresh_loop(key));
        ChartSubscription {
            request,
            cache: self.clone(),
            rx,
            refresher: Some(refresher),
            _stable_publisher: None,
        }
    }
}

/// A live handle onto one chart key.
///
/// `snapshot` produces the UI-ready series; `changed` resolves whenever a
/// background or manual revalidation published a new base series.
pub struct ChartSubscription<S: CandleProvider + 'static> {
    request: ChartRequest,
    cache: SeriesCache<S>,
    rx: watch::Receiver<BaseSeries>,
    refresher: Option<JoinHandle<()>>,
    _stable_publisher: Option<watch::Sender<BaseSeries>>,
}

impl<S: CandleProvider + 'static> ChartSubscription<S> {
    /// The UI-ready series as of now.
    ///
    /// Stable assets yield the synthetic flat series. Otherwise the cached
    /// base series is composed with the live average price (tail amend or
    /// append) and gap-filled. Empty only when no fetch has ever succeeded
    /// for this key.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Candle> {
        let now = chrono::Utc::now().timestamp();
        self.snapshot_at(now)
    }

    /// `snapshot` with an explicit wall-clock second (used in tests).
    #[must_use]
    pub fn snapshot_at(&self, now: i64) -> Vec<Candle> {
        if self.request.stable {
            return stable_series(self.request.period, now);
        }
        let Some(base) = self.rx.borrow().clone() else {
            return Vec::new();
        };
        let mut series = (*base).clone();
        if let Some(price) = self.request.current_average_price {
            append_current_average_price(
                &mut series,
                price,
                self.request.period,
                self.cache.tz_offset(),
                now,
            );
        }
        fill_gaps(series.as_slice(), self.request.period.seconds())
    }

    /// Wait until a new base series is published for this key.
    ///
    /// Returns `false` if the cache side of the channel is gone. Stable
    /// subscriptions never resolve: their series has no updates.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Force an out-of-band revalidation of this key, e.g. after a user
    /// action moved the live average price. Bypasses the deduping interval
    /// but not the single-flight guarantee. No-op for stable assets.
    pub async fn refresh(&self) {
        if self.request.stable {
            return;
        }
        self.cache.revalidate(&self.request.key(), true).await;
    }

    /// Update the live average price merged into future snapshots.
    pub fn set_current_average_price(&mut self, price: Option<f64>) {
        self.request.current_average_price = price;
    }
}

impl<S: CandleProvider + 'static> Drop for ChartSubscription<S> {
    fn drop(&mut self) {
        if let Some(refresher) = self.refresher.take() {
            refresher.abort();
        }
    }
}
