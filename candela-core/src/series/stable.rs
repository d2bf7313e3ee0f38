use crate::types::{Candle, Period};

/// Number of buckets in a synthetic stable-asset series.
pub const STABLE_SERIES_LEN: usize = 100;

/// Synthesize a flat unit-price series for a pegged asset.
///
/// Produces exactly [`STABLE_SERIES_LEN`] candles with
/// `open = high = low = close = 1.0`, spaced one period apart and ending at
/// the bucket before the one containing `now`. No network access; the
/// chart path for pegged assets never touches the feed.
#[must_use]
pub fn stable_series(period: Period, now: i64) -> Vec<Candle> {
    let step = period.seconds();
    let current_bucket = now.div_euclid(step) * step;
    (1..=STABLE_SERIES_LEN as i64)
        .rev()
        .map(|i| Candle::flat(current_bucket - i * step, 1.0))
        .collect()
}
