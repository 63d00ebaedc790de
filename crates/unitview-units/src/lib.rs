#![forbid(unsafe_code)]

//! Units of measure for canonical/display value conversion.
//!
//! Values inside a model are always stored in canonical (SI) units. A
//! [`Unit`] converts between that canonical representation and what the user
//! sees, and knows how to round and step a displayed value. A [`UnitGroup`]
//! collects the mutually convertible units for one physical quantity and
//! names a default.
//!
//! # Example
//!
//! ```
//! use unitview_units::{UnitGroup, approx_eq};
//!
//! let length = UnitGroup::length();
//! let cm = length.find("cm").expect("length group has centimeters");
//! assert!(approx_eq(cm.to_display(0.25), 25.0));
//! assert!(approx_eq(cm.to_canonical(25.0), 0.25));
//! assert_eq!(length.default_unit().symbol(), "m");
//! ```
//!
//! # Invariants
//!
//! 1. `to_canonical(to_display(v)) ≈ v` for every finite `v`.
//! 2. `next_step(d) > d` and `previous_step(d) < d` for finite `d`.
//! 3. A group always contains its default unit.

pub mod group;
pub mod math;
pub mod unit;

pub use group::UnitGroup;
pub use math::{EPSILON, approx_eq};
pub use unit::{LinearUnit, Unit, UnitRef};
