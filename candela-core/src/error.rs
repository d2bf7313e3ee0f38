use thiserror::Error;

/// Unified error type for the candela workspace.
///
/// Transport and staleness failures are recoverable by design: the cache
/// orchestrator logs them and keeps serving the previous series. An unknown
/// feed is a configuration error and fails the call immediately.
#[derive(Debug, Error)]
pub enum CandelaError {
    /// A network request failed or timed out.
    #[error("{source_name} transport failed: {msg}")]
    Transport {
        /// Name of the data source that failed (e.g. "chainlink-graph").
        source_name: &'static str,
        /// Human-readable failure message.
        msg: String,
    },

    /// The fallback endpoint returned data older than the staleness threshold.
    #[error("stale chart data: last update at {updated_at}, threshold {threshold}")]
    Stale {
        /// Unix timestamp (seconds) of the payload's last update.
        updated_at: i64,
        /// Oldest acceptable update timestamp (seconds).
        threshold: i64,
    },

    /// A source returned fewer usable points than required.
    #[error("not enough price data: got {got}, want at least {want}")]
    InsufficientData {
        /// Number of points actually returned.
        got: usize,
        /// Minimum number of points required.
        want: usize,
    },

    /// The symbol has no configured oracle feed identifier.
    #[error("no price feed configured for symbol {symbol}")]
    UnknownFeed {
        /// Normalized symbol that failed resolution.
        symbol: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with returned or expected data (malformed values, etc.).
    #[error("data issue: {0}")]
    Data(String),
}

impl CandelaError {
    /// Helper: build a `Transport` error for a named source.
    pub fn transport(source_name: &'static str, msg: impl Into<String>) -> Self {
        Self::Transport {
            source_name,
            msg: msg.into(),
        }
    }

    /// Helper: build an `UnknownFeed` error for a symbol.
    pub fn unknown_feed(symbol: impl Into<String>) -> Self {
        Self::UnknownFeed {
            symbol: symbol.into(),
        }
    }

    /// True if the error should degrade to the previous cached series
    /// instead of surfacing to the UI.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Stale { .. } | Self::InsufficientData { .. }
        )
    }
}
