#![forbid(unsafe_code)]

//! The [`Unit`] contract and the stock [`LinearUnit`].

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::math::approx_eq;

/// Shared handle to a unit. Units are immutable, so sharing is free.
pub type UnitRef = Rc<dyn Unit>;

/// A display unit for one physical quantity.
///
/// Canonical values are SI; display values are what a user reads and types.
/// Implementations must keep `to_canonical` the inverse of `to_display`.
pub trait Unit: fmt::Debug {
    /// Symbol shown next to the value (e.g. `"cm"`). Unique within a group.
    fn symbol(&self) -> &str;

    /// Convert a canonical value into this unit.
    fn to_display(&self, canonical: f64) -> f64;

    /// Convert a value expressed in this unit back to canonical units.
    fn to_canonical(&self, display: f64) -> f64;

    /// Round a display value to the precision this unit presents.
    fn round(&self, display: f64) -> f64;

    /// The next "nice" display value strictly above `display`.
    fn next_step(&self, display: f64) -> f64;

    /// The previous "nice" display value strictly below `display`.
    fn previous_step(&self, display: f64) -> f64;
}

/// A unit related to the canonical unit by `canonical = display * factor + offset`.
///
/// Stepping moves to the neighbouring multiple of `step`; rounding keeps
/// `decimals` fractional digits.
///
/// ```
/// use unitview_units::{LinearUnit, Unit};
///
/// let celsius = LinearUnit::new("°C", 1.0).with_offset(273.15);
/// assert!((celsius.to_display(300.0) - 26.85).abs() < 1e-9);
/// assert_eq!(celsius.next_step(26.85), 27.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearUnit {
    symbol: Cow<'static, str>,
    factor: f64,
    offset: f64,
    step: f64,
    decimals: u8,
}

impl LinearUnit {
    /// Create a unit with the given scale factor, step `1` and three decimals.
    #[must_use]
    pub fn new(symbol: impl Into<Cow<'static, str>>, factor: f64) -> Self {
        Self {
            symbol: symbol.into(),
            factor,
            offset: 0.0,
            step: 1.0,
            decimals: 3,
        }
    }

    /// Set the canonical value that corresponds to a display value of zero.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the spinner step size, in display units. Non-positive steps are ignored.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        if step > 0.0 {
            self.step = step;
        }
        self
    }

    /// Set the number of fractional digits kept by [`Unit::round`].
    #[must_use]
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    /// Step size in display units.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Unit for LinearUnit {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn to_display(&self, canonical: f64) -> f64 {
        (canonical - self.offset) / self.factor
    }

    fn to_canonical(&self, display: f64) -> f64 {
        display * self.factor + self.offset
    }

    fn round(&self, display: f64) -> f64 {
        if !display.is_finite() {
            return display;
        }
        let scale = 10f64.powi(i32::from(self.decimals));
        let rounded = (display * scale).round() / scale;
        // Overflowed the scaled representation; keep the value as is.
        if rounded.is_finite() { rounded } else { display }
    }

    fn next_step(&self, display: f64) -> f64 {
        if !display.is_finite() {
            return display;
        }
        let mut next = ((display / self.step).floor() + 1.0) * self.step;
        if next <= display || approx_eq(next, display) {
            next += self.step;
        }
        next
    }

    fn previous_step(&self, display: f64) -> f64 {
        if !display.is_finite() {
            return display;
        }
        let mut previous = ((display / self.step).ceil() - 1.0) * self.step;
        if previous >= display || approx_eq(previous, display) {
            previous -= self.step;
        }
        previous
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
