use async_trait::async_trait;
use candela_core::{
    Candle, CandelaError, CandleProvider, ChainId, Period, aggregate_ticks,
    local_utc_offset_seconds,
};
use tracing::warn;

use crate::feeds::{feed_id, normalize_symbol};
use crate::graph::{GraphClient, GraphConfig};
use crate::stats::{StatsClient, StatsConfig};

/// Number of buckets of lookback requested from the fallback endpoint.
const FALLBACK_WINDOW_BUCKETS: i64 = 3_000;

/// Primary provider: oracle ticks from the subgraph, aggregated locally.
pub struct GraphSource {
    client: GraphClient,
    tz_offset: i64,
}

impl GraphSource {
    /// Build the source with the process-local display timezone offset.
    #[must_use]
    pub fn new(cfg: GraphConfig) -> Self {
        Self::with_tz_offset(cfg, local_utc_offset_seconds())
    }

    /// Build the source with an explicit display offset (used in tests).
    #[must_use]
    pub fn with_tz_offset(cfg: GraphConfig, tz_offset: i64) -> Self {
        Self {
            client: GraphClient::new(cfg),
            tz_offset,
        }
    }
}

#[async_trait]
impl CandleProvider for GraphSource {
    async fn candles(
        &self,
        _chain: ChainId,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<Candle>, CandelaError> {
        let feed = feed_id(symbol)?;
        let ticks = self.client.prices(feed).await?;
        Ok(aggregate_ticks(&ticks, period, self.tz_offset))
    }

    fn name(&self) -> &'static str {
        crate::graph::SOURCE_NAME
    }
}

/// Secondary provider: pre-aggregated candles from the stats REST endpoint.
pub struct StatsSource {
    client: StatsClient,
    tz_offset: i64,
}

impl StatsSource {
    /// Build the source with the process-local display timezone offset.
    #[must_use]
    pub fn new(cfg: StatsConfig) -> Self {
        Self::with_tz_offset(cfg, local_utc_offset_seconds())
    }

    /// Build the source with an explicit display offset (used in tests).
    #[must_use]
    pub fn with_tz_offset(cfg: StatsConfig, tz_offset: i64) -> Self {
        Self {
            client: StatsClient::new(cfg),
            tz_offset,
        }
    }
}

#[async_trait]
impl CandleProvider for StatsSource {
    async fn candles(
        &self,
        chain: ChainId,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<Candle>, CandelaError> {
        let now = chrono::Utc::now().timestamp();
        let from = now - period.seconds() * FALLBACK_WINDOW_BUCKETS;
        self.client
            .candles(
                chain,
                normalize_symbol(symbol),
                period,
                from,
                self.tz_offset,
                now,
            )
            .await
    }

    fn name(&self) -> &'static str {
        crate::stats::SOURCE_NAME
    }
}

/// Production source: subgraph first, stats endpoint as the fallback.
///
/// Recoverable primary failures (transport, staleness, thin data) are
/// logged and retried against the fallback; an `UnknownFeed` error is a
/// configuration problem and surfaces immediately without a fallback
/// attempt.
pub struct ChartSource<P, F> {
    primary: P,
    fallback: F,
}

impl ChartSource<GraphSource, StatsSource> {
    /// Build the default production pairing from client configs.
    #[must_use]
    pub fn new(graph: GraphConfig, stats: StatsConfig) -> Self {
        Self {
            primary: GraphSource::new(graph),
            fallback: StatsSource::new(stats),
        }
    }
}

impl<P, F> ChartSource<P, F>
where
    P: CandleProvider,
    F: CandleProvider,
{
    /// Pair an arbitrary primary and fallback provider.
    pub const fn with_providers(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> CandleProvider for ChartSource<P, F>
where
    P: CandleProvider,
    F: CandleProvider,
{
    async fn candles(
        &self,
        chain: ChainId,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<Candle>, CandelaError> {
        match self.primary.candles(chain, symbol, period).await {
            Ok(candles) => Ok(candles),
            Err(err) if err.is_recoverable() => {
                warn!(
                    source = self.primary.name(),
                    %symbol,
                    %period,
                    error = %err,
                    "primary chart source failed, trying fallback"
                );
                self.fallback.candles(chain, symbol, period).await
            }
            Err(err) => Err(err),
        }
    }

    fn name(&self) -> &'static str {
        "chart-source"
    }
}
