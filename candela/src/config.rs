use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for the series cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Minimum interval between upstream fetches for one key. Revalidation
    /// requests arriving inside this window coalesce onto the cached
    /// series. Manual refresh bypasses this gate (but never the
    /// single-flight guarantee).
    pub dedupe_interval: Duration,
    /// Cadence of the per-subscription background revalidation timer.
    pub refresh_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dedupe_interval: Duration::from_secs(60),
            refresh_interval: Duration::from_secs(600),
        }
    }
}
