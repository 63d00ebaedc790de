#![forbid(unsafe_code)]

//! Groups of mutually convertible units.
//!
//! Stock groups cover the common quantities; a custom group is built from a
//! default unit plus any number of extra units:
//!
//! ```
//! use unitview_units::{LinearUnit, UnitGroup};
//!
//! let speed = UnitGroup::new("speed", LinearUnit::new("m/s", 1.0))
//!     .with_unit(LinearUnit::new("km/h", 1.0 / 3.6));
//! assert!(speed.find("km/h").is_some());
//! assert_eq!(speed.default_unit().symbol(), "m/s");
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

use crate::unit::{LinearUnit, Unit, UnitRef};

/// A set of convertible units with one default.
///
/// Cloning is cheap; clones share the same unit list. Membership is decided
/// by symbol, so two groups built the same way accept each other's units.
#[derive(Clone)]
pub struct UnitGroup {
    name: Rc<str>,
    units: Rc<[UnitRef]>,
}

impl UnitGroup {
    /// Create a group whose only (and default) unit is `default`.
    #[must_use]
    pub fn new(name: &str, default: impl Unit + 'static) -> Self {
        let default: UnitRef = Rc::new(default);
        Self {
            name: Rc::from(name),
            units: Rc::from(vec![default]),
        }
    }

    /// Add another unit. A unit whose symbol is already present is ignored.
    #[must_use]
    pub fn with_unit(self, unit: impl Unit + 'static) -> Self {
        if self.contains(&unit) {
            return self;
        }
        let mut units: Vec<UnitRef> = self.units.iter().cloned().collect();
        units.push(Rc::new(unit));
        Self {
            name: self.name,
            units: Rc::from(units),
        }
    }

    /// Group name (e.g. `"length"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit a fresh model starts in. Always the first unit of the group.
    #[must_use]
    pub fn default_unit(&self) -> UnitRef {
        Rc::clone(&self.units[0])
    }

    /// All units, default first.
    #[must_use]
    pub fn units(&self) -> &[UnitRef] {
        &self.units
    }

    /// Whether a unit with the same symbol belongs to this group.
    #[must_use]
    pub fn contains(&self, unit: &dyn Unit) -> bool {
        self.find(unit.symbol()).is_some()
    }

    /// Look up a unit by symbol.
    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<UnitRef> {
        self.units.iter().find(|u| u.symbol() == symbol).cloned()
    }

    /// Dimensionless values.
    #[must_use]
    pub fn none() -> Self {
        Self::new("none", LinearUnit::new("", 1.0))
    }

    /// Lengths; canonical unit is the meter.
    #[must_use]
    pub fn length() -> Self {
        Self::new("length", LinearUnit::new("m", 1.0).with_step(0.1))
            .with_unit(LinearUnit::new("cm", 0.01))
            .with_unit(LinearUnit::new("mm", 0.001))
            .with_unit(LinearUnit::new("in", 0.0254).with_step(0.1))
            .with_unit(LinearUnit::new("ft", 0.3048).with_step(0.1))
    }

    /// Angles; canonical unit is the radian.
    #[must_use]
    pub fn angle() -> Self {
        Self::new("angle", LinearUnit::new("°", PI / 180.0).with_decimals(1))
            .with_unit(LinearUnit::new("rad", 1.0).with_step(0.01))
    }

    /// Temperatures; canonical unit is the kelvin.
    #[must_use]
    pub fn temperature() -> Self {
        Self::new("temperature", LinearUnit::new("K", 1.0).with_decimals(1))
            .with_unit(
                LinearUnit::new("°C", 1.0)
                    .with_offset(273.15)
                    .with_decimals(1),
            )
            .with_unit(
                LinearUnit::new("°F", 5.0 / 9.0)
                    .with_offset(273.15 - 32.0 * 5.0 / 9.0)
                    .with_decimals(1),
            )
    }

    /// Masses; canonical unit is the kilogram.
    #[must_use]
    pub fn mass() -> Self {
        Self::new("mass", LinearUnit::new("kg", 1.0).with_step(0.1))
            .with_unit(LinearUnit::new("g", 0.001))
            .with_unit(LinearUnit::new("oz", 0.028_349_523_125).with_step(0.1))
            .with_unit(LinearUnit::new("lb", 0.453_592_37).with_step(0.1))
    }

    /// Ratios; canonical value `1.0` means 100%.
    #[must_use]
    pub fn relative() -> Self {
        Self::new("relative", LinearUnit::new("%", 0.01).with_decimals(1))
            .with_unit(LinearUnit::new("", 1.0).with_step(0.01))
    }
}

impl fmt::Debug for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.units.iter().map(|u| u.symbol()).collect();
        f.debug_struct("UnitGroup")
            .field("name", &&*self.name)
            .field("units", &symbols)
            .finish()
    }
}

impl Default for UnitGroup {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use proptest::prelude::*;

    fn stock_groups() -> Vec<UnitGroup> {
        vec![
            UnitGroup::none(),
            UnitGroup::length(),
            UnitGroup::angle(),
            UnitGroup::temperature(),
            UnitGroup::mass(),
            UnitGroup::relative(),
        ]
    }

    #[test]
    fn default_unit_is_first() {
        let length = UnitGroup::length();
        assert_eq!(length.default_unit().symbol(), "m");
        assert_eq!(length.units()[0].symbol(), "m");
        assert_eq!(length.units().len(), 5);
    }

    #[test]
    fn membership_is_by_symbol() {
        let length = UnitGroup::length();
        assert!(length.contains(&LinearUnit::new("cm", 0.01)));
        assert!(!length.contains(&LinearUnit::new("kg", 1.0)));
        assert!(UnitGroup::length().contains(&*length.default_unit()));
    }

    #[test]
    fn duplicate_symbol_is_ignored() {
        let group = UnitGroup::new("g", LinearUnit::new("a", 1.0))
            .with_unit(LinearUnit::new("a", 2.0))
            .with_unit(LinearUnit::new("b", 2.0));
        assert_eq!(group.units().len(), 2);
        let a = group.find("a").expect("a is present");
        assert_eq!(a.to_canonical(1.0), 1.0);
    }

    #[test]
    fn find_misses_unknown_symbol() {
        assert!(UnitGroup::mass().find("furlong").is_none());
    }

    #[test]
    fn temperature_scales_agree() {
        let group = UnitGroup::temperature();
        let f = group.find("°F").expect("fahrenheit");
        let c = group.find("°C").expect("celsius");
        assert!(approx_eq(f.to_display(273.15), 32.0));
        assert!(approx_eq(f.to_display(373.15), 212.0));
        assert!(approx_eq(c.to_display(373.15), 100.0));
    }

    #[test]
    fn relative_percent_display() {
        let pct = UnitGroup::relative().default_unit();
        assert_eq!(pct.symbol(), "%");
        assert!(approx_eq(pct.to_display(0.25), 25.0));
    }

    #[test]
    fn debug_lists_symbols() {
        let debug = format!("{:?}", UnitGroup::angle());
        assert!(debug.contains("angle"));
        assert!(debug.contains("rad"));
    }

    #[test]
    fn default_group_is_dimensionless() {
        assert_eq!(UnitGroup::default().name(), "none");
    }

    proptest! {
        #[test]
        fn display_round_trip(v in -1.0e6f64..1.0e6) {
            for group in stock_groups() {
                for unit in group.units() {
                    let back = unit.to_canonical(unit.to_display(v));
                    prop_assert!(
                        (back - v).abs() <= 1e-9 * v.abs().max(1.0) + 1e-6,
                        "{}: {} -> {}", unit.symbol(), v, back
                    );
                }
            }
        }

        #[test]
        fn steps_move_strictly(d in -1.0e4f64..1.0e4) {
            for group in stock_groups() {
                for unit in group.units() {
                    prop_assert!(unit.next_step(d) > d);
                    prop_assert!(unit.previous_step(d) < d);
                }
            }
        }
    }
}
