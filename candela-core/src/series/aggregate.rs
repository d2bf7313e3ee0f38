use crate::types::{Candle, Period, TickPoint};

use super::bucket_start;

/// Bucket an ascending tick sequence into fixed-width OHLC candles.
///
/// - Bucket membership is `floor(timestamp / period) * period` on the raw
///   timestamp; the emitted `time` is the bucket start plus `tz_offset`.
/// - Each bucket's `open` carries the prior bucket's `close`, so the series
///   is visually continuous even when the feed jumps between buckets.
/// - The trailing bucket is emitted with whatever ticks it has accumulated;
///   the live reconciler keeps amending it until the next bucket opens.
/// - Fewer than two ticks yield an empty series: a single observation
///   cannot establish a candle boundary.
///
/// The input must already be strictly ascending by timestamp (the tick
/// reconciler guarantees this); out-of-order input produces unspecified
/// bucket contents but never panics.
#[must_use]
pub fn aggregate_ticks(ticks: &[TickPoint], period: Period, tz_offset: i64) -> Vec<Candle> {
    if ticks.len() < 2 {
        return Vec::new();
    }

    let step = period.seconds();
    let first = ticks[0];
    let mut candles = Vec::new();
    let mut prev_group = bucket_start(first.timestamp, step, 0);
    let mut open = first.price;
    let mut high = first.price;
    let mut low = first.price;
    let mut close = first.price;

    for tick in &ticks[1..] {
        let group = bucket_start(tick.timestamp, step, 0);
        if group != prev_group {
            candles.push(Candle {
                time: prev_group + tz_offset,
                open,
                high,
                low,
                close,
            });
            // New bucket opens at the prior close.
            open = close;
            high = close;
            low = close;
        }
        close = tick.price;
        high = high.max(tick.price);
        low = low.min(tick.price);
        prev_group = group;
    }

    candles.push(Candle {
        time: prev_group + tz_offset,
        open,
        high,
        low,
        close,
    });

    candles
}
