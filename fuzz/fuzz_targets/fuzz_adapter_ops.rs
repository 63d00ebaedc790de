#![no_main]

//! Random sequences of adapter operations, with echoing listeners attached,
//! never leave the model dispatching and never re-enter a write.

use std::cell::Cell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unitview_model::{
    ChangeEvent, ModelConfig, Observable, RangeAdapter, SpinnerAdapter, ToggleAdapter, ValueModel,
};
use unitview_units::UnitGroup;

#[derive(Arbitrary, Debug)]
enum Op {
    SpinnerSet(f64),
    SpinnerNext,
    SpinnerPrevious,
    RangeSet(i32),
    ToggleSet(bool),
    Unit(u8),
    ModelSet(f64),
}

fuzz_target!(|ops: Vec<Op>| {
    let model = ValueModel::constant_with(
        0.5,
        ModelConfig::default()
            .with_units(UnitGroup::length())
            .with_bounds(0.0, 2.0),
    );
    let spinner = SpinnerAdapter::new(&model);
    let range = Rc::new(RangeAdapter::linear(&model, 0.0, 2.0));
    let toggle = ToggleAdapter::new(&model);

    let depth = Rc::new(Cell::new(0u32));
    let (echo_spinner, echo_range, d) = (spinner.clone(), Rc::clone(&range), Rc::clone(&depth));
    let _sub = model.subscribe(move |_: &ChangeEvent| {
        d.set(d.get() + 1);
        assert_eq!(d.get(), 1, "listener re-entered");
        if let Ok(shown) = echo_spinner.value() {
            let _ = echo_spinner.set_value(shown);
        }
        if let Ok(n) = echo_range.value() {
            let _ = echo_range.set_value(n);
        }
        d.set(d.get() - 1);
    });

    for op in ops.into_iter().take(128) {
        match op {
            Op::SpinnerSet(v) => {
                let _ = spinner.set_value(v);
            }
            Op::SpinnerNext => {
                if let Ok(Some(next)) = spinner.next_value() {
                    let _ = spinner.set_value(next);
                }
            }
            Op::SpinnerPrevious => {
                if let Ok(Some(previous)) = spinner.previous_value() {
                    let _ = spinner.set_value(previous);
                }
            }
            Op::RangeSet(n) => {
                let _ = range.set_value(n);
            }
            Op::ToggleSet(selected) => toggle.set_selected(selected),
            Op::Unit(idx) => {
                let units = model.unit_group().units();
                let symbol = units[usize::from(idx) % units.len()].symbol().to_owned();
                let _ = model.set_current_unit_by_symbol(&symbol);
            }
            Op::ModelSet(v) => {
                let _ = model.set_value(v);
            }
        }
        assert!(!model.is_notifying());
        assert!(!toggle.is_selected());
    }
});
