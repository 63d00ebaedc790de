#![no_main]

//! Arbitrary control points and model values never push a range position
//! outside `[0, RANGE_MAX]`. For well-conditioned curves, positions are also
//! monotone in the value (up to one step of truncation noise).

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unitview_model::{RANGE_MAX, RangeAdapter, ValueModel};

const MAGNITUDE: f64 = 1.0e6;
const MIN_SPAN: f64 = 1.0e-3;
const BREAKPOINT_MARGIN: f64 = 1.0e-2;

#[derive(Arbitrary, Debug)]
struct Input {
    low: f64,
    breakpoint: f64,
    mid: f64,
    high: f64,
    values: Vec<f64>,
    positions: Vec<i32>,
}

impl Input {
    fn well_conditioned(&self) -> bool {
        [self.low, self.mid, self.high]
            .iter()
            .all(|v| v.is_finite() && v.abs() <= MAGNITUDE)
            && self.high - self.low >= MIN_SPAN
            && (BREAKPOINT_MARGIN..=1.0 - BREAKPOINT_MARGIN).contains(&self.breakpoint)
    }
}

fuzz_target!(|input: Input| {
    let model = ValueModel::constant(0.0);
    let Ok(range) = RangeAdapter::new(&model, input.low, input.breakpoint, input.mid, input.high)
    else {
        return;
    };

    let mut values: Vec<f64> = input
        .values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .take(64)
        .collect();
    values.sort_by(f64::total_cmp);

    let check_order = input.well_conditioned();
    let mut previous = 0;
    for v in values {
        if model.set_value(v).is_err() {
            return;
        }
        let Ok(n) = range.value() else {
            return;
        };
        assert!((0..=RANGE_MAX).contains(&n), "position {n} for value {v}");
        if check_order {
            assert!(n + 1 >= previous, "position fell from {previous} to {n} at value {v}");
        }
        previous = previous.max(n);
    }

    for &n in input.positions.iter().take(64) {
        let _ = range.set_value(n);
        if let Ok(back) = range.value() {
            assert!((0..=RANGE_MAX).contains(&back));
        }
    }
});
