#![forbid(unsafe_code)]

//! Piecewise linear-then-quadratic scale for range positions.
//!
//! Over the normalized position `x ∈ [0, 1]`:
//!
//! ```text
//! x ≤ bp:  v(x) = low + (mid - low) / bp · x
//! x > bp:  v(x) = q2·x² + q1·x + q0
//! ```
//!
//! The quadratic coefficients satisfy `v(bp) = mid`, `v(1) = high` and
//! `v'(bp) = (mid - low) / bp`, so the curve is continuous in value and in
//! slope at the breakpoint. A breakpoint of `1` makes the curve purely linear.

use crate::error::{ModelError, Result};

/// Shape of a range scale, independent of the current control-point values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleCurve {
    breakpoint: f64,
    q2: f64,
    q1: f64,
    q0: f64,
}

impl ScaleCurve {
    /// A purely linear curve from `low` to `high` (breakpoint `1`, `mid == high`).
    #[must_use]
    pub fn linear() -> Self {
        Self {
            breakpoint: 1.0,
            q2: 0.0,
            q1: 0.0,
            q0: 0.0,
        }
    }

    /// Solve the quadratic branch for the given control points.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidArgument`] unless `low < mid ≤ high` and
    /// `0 < breakpoint < 1`.
    pub fn new(low: f64, breakpoint: f64, mid: f64, high: f64) -> Result<Self> {
        if !(low < mid && mid <= high && 0.0 < breakpoint && breakpoint < 1.0) {
            return Err(ModelError::InvalidArgument(format!(
                "range curve requires low < mid <= high and 0 < breakpoint < 1, \
                 got low={low} mid={mid} high={high} breakpoint={breakpoint}"
            )));
        }
        let pos = breakpoint;
        let delta = (mid - low) / pos;
        let denom = (pos - 1.0) * (pos - 1.0);
        Ok(Self {
            breakpoint,
            q2: (high - mid - delta + delta * pos) / denom,
            q1: (delta + 2.0 * (mid - high) * pos - delta * pos * pos) / denom,
            q0: (mid - (2.0 * mid + delta) * pos + (high + delta) * pos * pos) / denom,
        })
    }

    /// Whether the curve has a quadratic branch.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.breakpoint >= 1.0
    }

    /// `[q2, q1, q0]` of the quadratic branch.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 3] {
        [self.q2, self.q1, self.q0]
    }

    /// Value of the linear branch at `x`.
    #[must_use]
    pub fn linear_value(&self, x: f64, low: f64, mid: f64) -> f64 {
        (mid - low) / self.breakpoint * x + low
    }

    /// Value of the quadratic branch at `x`.
    #[must_use]
    pub fn quadratic_value(&self, x: f64) -> f64 {
        self.q2 * x * x + self.q1 * x + self.q0
    }

    /// Map a normalized position to a value.
    #[must_use]
    pub fn forward(&self, x: f64, low: f64, mid: f64) -> f64 {
        if x <= self.breakpoint {
            self.linear_value(x, low, mid)
        } else {
            self.quadratic_value(x)
        }
    }

    /// Slope of the curve at `x`, from the side the position falls on.
    #[must_use]
    pub fn slope(&self, x: f64, low: f64, mid: f64) -> f64 {
        if x <= self.breakpoint {
            (mid - low) / self.breakpoint
        } else {
            2.0 * self.q2 * x + self.q1
        }
    }

    /// Map a value strictly inside `(low, high)` back to a normalized position.
    ///
    /// The result is clamped to `[0, 1]`.
    #[must_use]
    pub fn inverse(&self, value: f64, low: f64, mid: f64) -> f64 {
        let x = if value <= mid {
            (value - low) * self.breakpoint / (mid - low)
        } else {
            // Root of q2·x² + q1·x + (q0 - value) on the rising side, in the
            // form that avoids cancellation (and covers q2 == 0).
            let root = (self.q1 * self.q1 - 4.0 * self.q2 * (self.q0 - value))
                .max(0.0)
                .sqrt();
            if self.q1 >= 0.0 {
                2.0 * (value - self.q0) / (self.q1 + root)
            } else {
                (root - self.q1) / (2.0 * self.q2)
            }
        };
        if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
    }
}

impl Default for ScaleCurve {
    fn default() -> Self {
        Self::linear()
    }
}
