#![forbid(unsafe_code)]

//! View adapters over a [`ValueModel`](crate::ValueModel).
//!
//! | Adapter | Projection | Events |
//! |---------|------------|--------|
//! | [`SpinnerAdapter`] | display-unit value, stepped | the model's |
//! | [`RangeAdapter`] | position in `[0, RANGE_MAX]` | the model's |
//! | [`ToggleAdapter`] | automatic flag | its own [`SelectedChange`] |
//!
//! Every write path drops the write while the model is dispatching, so an
//! adapter refreshing itself from a notification cannot echo the value back.

pub mod curve;
pub mod range;
pub mod spinner;
pub mod toggle;

pub use curve::ScaleCurve;
pub use range::{RANGE_MAX, RangeAdapter};
pub use spinner::SpinnerAdapter;
pub use toggle::{SelectedChange, ToggleAdapter};
