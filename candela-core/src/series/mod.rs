//! Candle series construction.
//!
//! The pipeline runs leaf to root: reconciled ticks are bucketed into
//! candles (`aggregate`), missing buckets are back-filled with synthetic
//! flat candles (`gaps`), and the current on-chain average price is merged
//! into the tail (`live`). Pegged assets bypass all of it (`stable`).

pub mod aggregate;
pub mod gaps;
pub mod live;
pub mod stable;

use std::sync::OnceLock;

use chrono::Offset;

/// Local UTC offset in seconds, computed once per process.
///
/// Candle `time` fields are shifted by this amount for display alignment
/// only; bucket membership math always uses raw UTC timestamps.
pub fn local_utc_offset_seconds() -> i64 {
    static OFFSET: OnceLock<i64> = OnceLock::new();
    *OFFSET.get_or_init(|| {
        i64::from(
            chrono::Local::now()
                .offset()
                .fix()
                .local_minus_utc(),
        )
    })
}

/// Compute the timezone-shifted start of the bucket containing `ts`.
#[must_use]
pub(crate) const fn bucket_start(ts: i64, period_seconds: i64, tz_offset: i64) -> i64 {
    ts.div_euclid(period_seconds) * period_seconds + tz_offset
}
