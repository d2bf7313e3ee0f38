//! candela-core
//!
//! Core types and pure transforms shared across the candela ecosystem.
//!
//! - `types`: chart periods, ticks, candles, and the append/amend-last
//!   `CandleSeries` container.
//! - `provider`: the `CandleProvider` trait implemented by data sources.
//! - `series`: the tick-to-candle aggregation, gap filling, live-price
//!   reconciliation, and stable-asset series transforms.
//!
//! Everything in `series` is a pure function of its inputs: wall-clock time
//! and the display timezone offset are always passed in by the caller, so
//! the transforms stay deterministic under test.
#![warn(missing_docs)]

/// Unified workspace error type.
pub mod error;
/// Data-source trait implemented by connectors and test mocks.
pub mod provider;
/// Candle series construction: aggregation, gap filling, live reconciliation.
pub mod series;
/// Common data structures shared across the workspace.
pub mod types;

pub use error::CandelaError;
pub use provider::CandleProvider;
pub use series::aggregate::aggregate_ticks;
pub use series::gaps::fill_gaps;
pub use series::live::append_current_average_price;
pub use series::stable::stable_series;
pub use series::local_utc_offset_seconds;
pub use types::{Candle, CandleSeries, ChainId, Period, TickPoint};
