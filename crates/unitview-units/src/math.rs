#![forbid(unsafe_code)]

//! Floating-point comparison helpers.

/// Relative tolerance used by [`approx_eq`].
pub const EPSILON: f64 = 1e-8;

/// Compare two values with a relative tolerance of [`EPSILON`].
///
/// Values of magnitude below one are compared with an absolute tolerance.
/// Equal infinities compare equal; `NaN` never does.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() < EPSILON * scale
}
