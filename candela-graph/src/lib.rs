//! candela-graph
//!
//! Data-source connectors for the candela chart pipeline:
//!
//! - `feeds`: the static Chainlink aggregator registry and wrapped-symbol
//!   normalization.
//! - `graph`: the paginated subgraph client that retrieves and reconciles
//!   raw oracle ticks.
//! - `stats`: the fallback REST candle endpoint client with staleness
//!   validation.
//! - `source`: `CandleProvider` implementations composing the two paths.
#![warn(missing_docs)]

/// Oracle feed registry and symbol normalization.
pub mod feeds;
/// Paginated subgraph tick client.
pub mod graph;
/// `CandleProvider` implementations over the clients.
pub mod source;
/// Fallback REST candle endpoint client.
pub mod stats;

pub use feeds::{feed_id, normalize_symbol};
pub use graph::{GraphClient, GraphConfig};
pub use source::{ChartSource, GraphSource, StatsSource};
pub use stats::{StatsClient, StatsConfig};
