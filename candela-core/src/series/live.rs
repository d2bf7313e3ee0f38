use crate::types::{Candle, CandleSeries, Period};

use super::bucket_start;

/// Merge the current on-chain average price into the tail of the series.
///
/// The current bucket start is derived from `now` with the same timezone
/// shift as the aggregator. When it matches the tail candle's time the tail
/// is amended in place: `close` becomes the live price and `high` is raised
/// to cover it. Note that `low` is also only ever raised, never lowered,
/// by the live price; this asymmetry is long-standing production chart
/// behavior and is kept as-is (and pinned by tests) until product confirms
/// the intent.
///
/// When the tail is from an earlier bucket, a fresh in-progress candle is
/// appended whose `open` carries the previous close and whose remaining
/// prices all start at the live price.
///
/// Only the tail element is ever touched; historical candles are never
/// rewritten. An empty series, or a `now` that falls before the tail's
/// bucket (clock skew), leaves the series unchanged.
pub fn append_current_average_price(
    series: &mut CandleSeries,
    price: f64,
    period: Period,
    tz_offset: i64,
    now: i64,
) {
    let current_time = bucket_start(now, period.seconds(), tz_offset);
    let Some(last) = series.last().copied() else {
        return;
    };

    if current_time == last.time {
        series.amend_last(|c| {
            c.close = price;
            c.high = c.high.max(price);
            c.low = c.low.max(price);
        });
    } else if current_time > last.time {
        // push cannot fail: current_time is strictly later than the tail.
        let _ = series.push(Candle {
            time: current_time,
            open: last.close,
            high: price,
            low: price,
            close: price,
        });
    }
}
