use candela_core::series::stable::STABLE_SERIES_LEN;
use candela_core::{Period, stable_series};

#[test]
fn hundred_flat_unit_candles() {
    let now = 1_700_000_123;
    let series = stable_series(Period::H1, now);
    assert_eq!(series.len(), STABLE_SERIES_LEN);
    for c in &series {
        assert_eq!(c.open, 1.0);
        assert_eq!(c.high, 1.0);
        assert_eq!(c.low, 1.0);
        assert_eq!(c.close, 1.0);
    }
}

#[test]
fn ascending_and_period_spaced() {
    let now = 1_700_000_123;
    for period in Period::ALL {
        let series = stable_series(period, now);
        for w in series.windows(2) {
            assert_eq!(w[1].time - w[0].time, period.seconds());
        }
        let current_bucket = now.div_euclid(period.seconds()) * period.seconds();
        assert_eq!(series.last().unwrap().time, current_bucket - period.seconds());
    }
}
