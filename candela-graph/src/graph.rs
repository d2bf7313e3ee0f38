use std::collections::HashSet;
use std::str::FromStr;

use candela_core::{CandelaError, TickPoint};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

/// Log/source name used in `Transport` errors from this client.
pub const SOURCE_NAME: &str = "chainlink-graph";

/// Decimal places of the oracle's fixed-point answers.
const ORACLE_DECIMALS: u32 = 8;

/// Subgraph client configuration.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Subgraph HTTP endpoint (GraphQL over POST).
    pub endpoint: String,
    /// Records requested per page.
    pub page_size: usize,
    /// Number of pages fetched concurrently per pass.
    pub page_count: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.thegraph.com/subgraphs/name/deividask/chainlink".to_string(),
            page_size: 1_000,
            page_count: 6,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphResponse {
    data: Option<GraphData>,
    #[serde(default)]
    errors: Vec<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphData {
    #[serde(rename = "chainlinkPrices")]
    chainlink_prices: Vec<PriceRecord>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    timestamp: i64,
    /// Fixed-point answer with [`ORACLE_DECIMALS`] implied decimals.
    value: String,
}

/// Paginated Chainlink subgraph client.
///
/// One `prices` pass issues `page_count` page queries concurrently, each
/// asking for the `page_size` most recent records at a page-specific offset
/// (newest first). Pages may overlap; duplicate timestamps are dropped with
/// first occurrence winning, then the surviving ticks are scaled out of
/// fixed point and sorted ascending. No gap filling and no bucketing happen
/// here.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    cfg: GraphConfig,
}

impl GraphClient {
    /// Build a client over a shared `reqwest` connection pool.
    #[must_use]
    pub fn new(cfg: GraphConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    /// Fetch and reconcile the recent tick window for `feed_id`.
    ///
    /// Fail-fast: if any page fails, the whole pass fails with `Transport`.
    /// Retry is the cache orchestrator's concern, not this client's.
    ///
    /// # Errors
    /// `Transport` for HTTP or GraphQL-level failures, `Data` for answers
    /// that do not parse as fixed-point decimals.
    pub async fn prices(&self, feed_id: &str) -> Result<Vec<TickPoint>, CandelaError> {
        let pages = (0..self.cfg.page_count).map(|page| self.fetch_page(feed_id, page));
        let results = futures::future::join_all(pages).await;

        let mut seen = HashSet::new();
        let mut ticks = Vec::new();
        for page in results {
            for record in page? {
                if seen.insert(record.timestamp) {
                    ticks.push(TickPoint {
                        timestamp: record.timestamp,
                        price: scale_answer(&record.value)?,
                    });
                }
            }
        }

        ticks.sort_unstable_by_key(|t| t.timestamp);
        Ok(ticks)
    }

    async fn fetch_page(
        &self,
        feed_id: &str,
        page: usize,
    ) -> Result<Vec<PriceRecord>, CandelaError> {
        let query = format!(
            "{{ chainlinkPrices(first: {first}, skip: {skip}, \
             orderBy: timestamp, orderDirection: desc, \
             where: {{token: \"{feed_id}\"}}) {{ timestamp, value }} }}",
            first = self.cfg.page_size,
            skip = page * self.cfg.page_size,
        );

        let response = self
            .http
            .post(&self.cfg.endpoint)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .map_err(|e| CandelaError::transport(SOURCE_NAME, e.to_string()))?
            .error_for_status()
            .map_err(|e| CandelaError::transport(SOURCE_NAME, e.to_string()))?;

        let body: GraphResponse = response
            .json()
            .await
            .map_err(|e| CandelaError::transport(SOURCE_NAME, e.to_string()))?;

        if let Some(err) = body.errors.first() {
            return Err(CandelaError::transport(SOURCE_NAME, err.message.clone()));
        }
        body.data
            .map(|d| d.chainlink_prices)
            .ok_or_else(|| CandelaError::transport(SOURCE_NAME, "empty graphql response"))
    }
}

/// Scale a fixed-point oracle answer string into a float price.
fn scale_answer(value: &str) -> Result<f64, CandelaError> {
    let raw = Decimal::from_str(value)
        .map_err(|e| CandelaError::Data(format!("bad oracle answer {value:?}: {e}")))?;
    let scaled = raw / Decimal::from(10u64.pow(ORACLE_DECIMALS));
    scaled
        .to_f64()
        .ok_or_else(|| CandelaError::Data(format!("oracle answer out of range: {value:?}")))
}
