use crate::types::Candle;

/// Upward wick applied to synthetic gap candles (+0.03%).
pub const SYNTHETIC_HIGH_FACTOR: f64 = 1.0003;
/// Downward wick applied to synthetic gap candles (-0.04%).
pub const SYNTHETIC_LOW_FACTOR: f64 = 0.9996;

/// Insert synthetic flat candles for every missing bucket between
/// consecutive real candles.
///
/// A pair of neighbors `delta = next.time - prev.time` more than one period
/// apart gets `delta / period - 1` fillers, each derived from the *next*
/// real candle's `open` with a fixed cosmetic wick (`high = open * 1.0003`,
/// `low = open * 0.9996`) that marks "no trade data in this bucket" on the
/// chart. A series with fewer than two candles is returned unchanged.
///
/// Pure and idempotent: re-applying to its own output is a no-op.
#[must_use]
pub fn fill_gaps(candles: &[Candle], period_seconds: i64) -> Vec<Candle> {
    if candles.len() < 2 {
        return candles.to_vec();
    }

    let mut filled = Vec::with_capacity(candles.len());
    filled.push(candles[0]);
    let mut prev_time = candles[0].time;

    for candle in &candles[1..] {
        let mut missing = (candle.time - prev_time) / period_seconds - 1;
        while missing > 0 {
            filled.push(Candle {
                time: candle.time - missing * period_seconds,
                open: candle.open,
                high: candle.open * SYNTHETIC_HIGH_FACTOR,
                low: candle.open * SYNTHETIC_LOW_FACTOR,
                close: candle.open,
            });
            missing -= 1;
        }
        prev_time = candle.time;
        filled.push(*candle);
    }

    filled
}
