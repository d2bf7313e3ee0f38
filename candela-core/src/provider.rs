use async_trait::async_trait;

use crate::{Candle, CandelaError, ChainId, Period};

/// A source of aggregated candle data for one (chain, symbol, period) key.
///
/// Implemented by the subgraph and REST connectors in `candela-graph` and by
/// in-memory mocks in tests. Implementations return candles that are
/// strictly ascending by `time` and already timezone-shifted for display;
/// they do not gap-fill and do not merge the live average price, both of
/// which happen downstream of the cache.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch the recent candle series for `symbol` on `chain` at `period`.
    ///
    /// # Errors
    /// `Transport` on network failure, `UnknownFeed` if the symbol has no
    /// configured feed, `Stale`/`InsufficientData` for rejected fallback
    /// payloads. An empty `Ok` result is valid and means the feed had too
    /// few ticks to establish a candle.
    async fn candles(
        &self,
        chain: ChainId,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<Candle>, CandelaError>;

    /// Short stable name used in logs and `Transport` errors.
    fn name(&self) -> &'static str;
}
