use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use candela_core::{Candle, CandelaError, CandleProvider, ChainId, Period};
use candela::ChartRequest;

/// Fixed wall-clock second used by snapshot assertions.
pub const NOW: i64 = 1_700_000_000;

/// Start of the M5 bucket containing [`NOW`].
pub const BUCKET: i64 = NOW - NOW % 300;

type Script = Box<dyn Fn(usize) -> Result<Vec<Candle>, CandelaError> + Send + Sync>;

/// Scripted in-memory provider: call `n` yields `script(n)`.
pub struct MockProvider {
    calls: Arc<AtomicUsize>,
    delay: Duration,
    script: Script,
}

impl MockProvider {
    pub fn new(
        script: impl Fn(usize) -> Result<Vec<Candle>, CandelaError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
            script: Box::new(script),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared upstream-call counter, usable after the provider moved into
    /// the cache.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CandleProvider for MockProvider {
    async fn candles(
        &self,
        _chain: ChainId,
        _symbol: &str,
        _period: Period,
    ) -> Result<Vec<Candle>, CandelaError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }
        (self.script)(n)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

pub fn request(symbol: &str) -> ChartRequest {
    ChartRequest {
        chain: ChainId(1),
        symbol: symbol.to_string(),
        period: Period::M5,
        stable: false,
        current_average_price: None,
    }
}

/// Two adjacent real candles ending one bucket before [`BUCKET`].
pub fn base_candles() -> Vec<Candle> {
    vec![
        Candle {
            time: BUCKET - 600,
            open: 10.0,
            high: 11.0,
            low: 9.5,
            close: 10.5,
        },
        Candle {
            time: BUCKET - 300,
            open: 10.5,
            high: 10.8,
            low: 10.2,
            close: 10.6,
        },
    ]
}
