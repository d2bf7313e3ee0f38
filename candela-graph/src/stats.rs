use std::time::Duration;

use candela_core::{Candle, CandelaError, ChainId, Period};
use serde::Deserialize;

/// Log/source name used in `Transport` errors from this client.
pub const SOURCE_NAME: &str = "stats-rest";

/// Minimum number of candles an acceptable payload must carry.
pub const MIN_POINTS: usize = 10;

/// Maximum age in seconds of a payload's `updatedAt` before it is rejected
/// as stale.
pub const OBSOLETE_THRESHOLD_SECS: i64 = 30 * 60;

/// Fallback REST endpoint configuration.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Endpoint base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. The underlying request may keep running after
    /// the timeout fires; the caller simply discards its eventual result.
    pub timeout: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stats.gmx.io".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CandlesPayload {
    #[serde(default)]
    prices: Vec<RawCandle>,
    #[serde(rename = "updatedAt", default)]
    updated_at: i64,
}

#[derive(Debug, Deserialize)]
struct RawCandle {
    t: i64,
    o: f64,
    c: f64,
    h: f64,
    l: f64,
}

/// Client for the fallback pre-aggregated candle endpoint.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    cfg: StatsConfig,
}

impl StatsClient {
    /// Build a client over a shared `reqwest` connection pool.
    #[must_use]
    pub fn new(cfg: StatsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    /// Fetch candles for `symbol` starting at `from`, shifting each
    /// returned time by `tz_offset` for display.
    ///
    /// # Errors
    /// - `Transport` on HTTP failure or timeout.
    /// - `InsufficientData` when fewer than [`MIN_POINTS`] candles arrive.
    /// - `Stale` when `updatedAt` is older than [`OBSOLETE_THRESHOLD_SECS`].
    pub async fn candles(
        &self,
        chain: ChainId,
        symbol: &str,
        period: Period,
        from: i64,
        tz_offset: i64,
        now: i64,
    ) -> Result<Vec<Candle>, CandelaError> {
        let url = format!(
            "{}/api/candles/{symbol}?preferableChainId={chain}&period={period}&from={from}&preferableSource=fast",
            self.cfg.base_url,
        );

        let request = async {
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|e| CandelaError::transport(SOURCE_NAME, e.to_string()))?
                .error_for_status()
                .map_err(|e| CandelaError::transport(SOURCE_NAME, e.to_string()))?
                .json::<CandlesPayload>()
                .await
                .map_err(|e| CandelaError::transport(SOURCE_NAME, e.to_string()))
        };
        let payload = tokio::time::timeout(self.cfg.timeout, request)
            .await
            .map_err(|_| CandelaError::transport(SOURCE_NAME, format!("request timeout {url}")))??;

        if payload.prices.len() < MIN_POINTS {
            return Err(CandelaError::InsufficientData {
                got: payload.prices.len(),
                want: MIN_POINTS,
            });
        }

        let threshold = now - OBSOLETE_THRESHOLD_SECS;
        if payload.updated_at < threshold {
            return Err(CandelaError::Stale {
                updated_at: payload.updated_at,
                threshold,
            });
        }

        Ok(payload
            .prices
            .into_iter()
            .map(|p| Candle {
                time: p.t + tz_offset,
                open: p.o,
                high: p.h,
                low: p.l,
                close: p.c,
            })
            .collect())
    }
}
