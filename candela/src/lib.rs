//! candela
//!
//! The chart-facing facade of the candela ecosystem: a per-key series cache
//! with stale-while-revalidate semantics over any
//! [`candela_core::CandleProvider`].
//!
//! A [`SeriesCache`] keys entries by `(chain, symbol, period)` and
//! guarantees at most one in-flight fetch per key. Subscribers obtain a
//! [`ChartSubscription`] whose snapshots run the full display pipeline:
//! live average-price reconciliation into the tail candle, then synthetic
//! gap filling. Pegged assets short-circuit to a flat unit-price series and
//! never touch the network.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Subscriptions spawn their background revalidation task with
//! `tokio::spawn` and publish through `tokio::sync::watch`, so a Tokio 1.x
//! runtime is required.
#![warn(missing_docs)]

/// Series cache and revalidation orchestration.
pub mod cache;
/// Cache tuning knobs.
pub mod config;
/// Subscriber-facing chart subscriptions.
pub mod subscription;

pub use cache::{ChartKey, SeriesCache};
pub use config::CacheConfig;
pub use subscription::{ChartRequest, ChartSubscription};

use candela_graph::{ChartSource, GraphConfig, GraphSource, StatsConfig, StatsSource};

/// The production cache type: subgraph primary with REST fallback.
pub type ProductionCache = SeriesCache<ChartSource<GraphSource, StatsSource>>;

/// Build the production cache from source and cache configuration.
#[must_use]
pub fn production_cache(
    graph: GraphConfig,
    stats: StatsConfig,
    cache: CacheConfig,
) -> ProductionCache {
    SeriesCache::new(ChartSource::new(graph, stats), cache)
}
