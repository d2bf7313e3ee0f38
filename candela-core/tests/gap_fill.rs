use candela_core::series::gaps::{SYNTHETIC_HIGH_FACTOR, SYNTHETIC_LOW_FACTOR};
use candela_core::{Candle, fill_gaps};
use proptest::prelude::*;

fn arb_sparse_series() -> impl Strategy<Value = (Vec<Candle>, i64)> {
    // Candles on a period grid with random positive bucket gaps.
    (
        prop::sample::select(vec![60i64, 300, 900, 3_600]),
        0i64..1_000_000i64,
        proptest::collection::vec((1i64..20i64, 100u32..100_000u32), 0..50),
    )
        .prop_map(|(step, start, hops)| {
            let mut time = start;
            let candles = hops
                .into_iter()
                .map(|(buckets, cents)| {
                    time += buckets * step;
                    let p = f64::from(cents) / 100.0;
                    Candle {
                        time,
                        open: p,
                        high: p * 1.01,
                        low: p * 0.99,
                        close: p,
                    }
                })
                .collect();
            (candles, step)
        })
}

proptest! {
    #[test]
    fn no_gaps_remain_after_one_pass((candles, step) in arb_sparse_series()) {
        let filled = fill_gaps(&candles, step);
        for w in filled.windows(2) {
            prop_assert_eq!(w[1].time - w[0].time, step);
        }
    }

    #[test]
    fn idempotent((candles, step) in arb_sparse_series()) {
        let once = fill_gaps(&candles, step);
        let twice = fill_gaps(&once, step);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn real_candles_survive_unchanged((candles, step) in arb_sparse_series()) {
        let filled = fill_gaps(&candles, step);
        let kept: Vec<Candle> = filled
            .iter()
            .copied()
            .filter(|c| candles.iter().any(|o| o.time == c.time))
            .collect();
        prop_assert_eq!(kept, candles);
    }
}

#[test]
fn worked_example_fills_two_buckets() {
    // Candles at 0 and 180 with a 60s period leave buckets 60 and 120
    // empty; both fillers derive from the later candle's open.
    let candles = [
        Candle {
            time: 0,
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.5,
        },
        Candle {
            time: 180,
            open: 12.0,
            high: 13.0,
            low: 11.5,
            close: 12.5,
        },
    ];
    let filled = fill_gaps(&candles, 60);
    assert_eq!(filled.len(), 4);
    assert_eq!(filled[1].time, 60);
    assert_eq!(filled[2].time, 120);
    for synthetic in &filled[1..3] {
        assert_eq!(synthetic.open, 12.0);
        assert_eq!(synthetic.close, 12.0);
        assert_eq!(synthetic.high, 12.0 * SYNTHETIC_HIGH_FACTOR);
        assert_eq!(synthetic.low, 12.0 * SYNTHETIC_LOW_FACTOR);
    }
}

#[test]
fn short_series_returned_unchanged() {
    assert!(fill_gaps(&[], 60).is_empty());
    let one = [Candle::flat(0, 1.0)];
    assert_eq!(fill_gaps(&one, 60), one.to_vec());
}
