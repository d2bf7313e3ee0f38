//! Common data structures: periods, ticks, candles, and series containers.

use serde::{Deserialize, Serialize};

use crate::CandelaError;

/// Chart aggregation period.
///
/// The set is fixed: these are the only bucket widths the chart offers, and
/// every component (aggregator, gap filler, cache keys) consults the same
/// `seconds()` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Five minutes.
    M5,
    /// Fifteen minutes.
    M15,
    /// One hour.
    H1,
    /// Four hours.
    H4,
    /// One day.
    D1,
}

impl Period {
    /// All supported periods, in ascending bucket width.
    pub const ALL: [Self; 5] = [Self::M5, Self::M15, Self::H1, Self::H4, Self::D1];

    /// Bucket width in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::M5 => 300,
            Self::M15 => 900,
            Self::H1 => 3_600,
            Self::H4 => 14_400,
            Self::D1 => 86_400,
        }
    }

    /// Canonical identifier used in URLs and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = CandelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(Self::M5),
            "15m" => Ok(Self::M15),
            "1h" => Ok(Self::H1),
            "4h" => Ok(Self::H4),
            "1d" => Ok(Self::D1),
            other => Err(CandelaError::InvalidArg(format!(
                "unknown chart period: {other}"
            ))),
        }
    }
}

/// Network (chain) identifier used to discriminate cache keys and the
/// fallback endpoint's `preferableChainId` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single timestamped price observation from the oracle feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickPoint {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// Price in quote units (already scaled out of the oracle's fixed point).
    pub price: f64,
}

/// One OHLC candle.
///
/// `time` is the bucket start, already shifted by the display timezone
/// offset. Real candles satisfy `low <= min(open, close)` and
/// `max(open, close) <= high`; the live tail candle may violate the low
/// bound (see `append_current_average_price`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start in seconds, timezone-adjusted for display.
    pub time: i64,
    /// First traded price of the bucket (carried from the prior close).
    pub open: f64,
    /// Highest price of the bucket.
    pub high: f64,
    /// Lowest price of the bucket.
    pub low: f64,
    /// Last traded price of the bucket.
    pub close: f64,
}

impl Candle {
    /// A flat candle where all four prices are equal.
    #[must_use]
    pub const fn flat(time: i64, price: f64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }
}

/// An ascending-by-time candle sequence with a restricted mutation surface.
///
/// Historical candles are immutable once a later bucket exists; only the
/// tail may ever change. The container therefore exposes exactly two write
/// operations: `push` (append a strictly later candle) and `amend_last`
/// (mutate the tail in place).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Empty series.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    /// Build a series from candles that are already strictly ascending by
    /// `time`.
    ///
    /// # Errors
    /// Returns `CandelaError::InvalidArg` if any neighbor pair is out of
    /// order or shares a timestamp.
    pub fn from_ascending(candles: Vec<Candle>) -> Result<Self, CandelaError> {
        if let Some(w) = candles.windows(2).find(|w| w[0].time >= w[1].time) {
            return Err(CandelaError::InvalidArg(format!(
                "candles out of order: {} then {}",
                w[0].time, w[1].time
            )));
        }
        Ok(Self { candles })
    }

    /// Append a candle strictly later than the current tail.
    ///
    /// # Errors
    /// Returns `CandelaError::InvalidArg` if `candle.time` is not strictly
    /// greater than the tail's time.
    pub fn push(&mut self, candle: Candle) -> Result<(), CandelaError> {
        if let Some(last) = self.candles.last()
            && candle.time <= last.time
        {
            return Err(CandelaError::InvalidArg(format!(
                "candle at {} does not extend series ending at {}",
                candle.time, last.time
            )));
        }
        self.candles.push(candle);
        Ok(())
    }

    /// Mutate the tail candle in place. Returns `false` on an empty series.
    /// The closure must not change the candle's `time`.
    pub fn amend_last(&mut self, f: impl FnOnce(&mut Candle)) -> bool {
        match self.candles.last_mut() {
            Some(last) => {
                let time = last.time;
                f(last);
                last.time = time;
                true
            }
            None => false,
        }
    }

    /// The tail candle, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Read-only view of the whole series.
    #[must_use]
    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    /// Number of candles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// True if the series holds no candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Consume the series, yielding its candles.
    #[must_use]
    pub fn into_vec(self) -> Vec<Candle> {
        self.candles
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}
