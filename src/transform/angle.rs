//! Angle normalization.

use core::f64::consts::PI;

use libm::floor;

/// Two pi.
pub const TAU: f64 = 2.0 * PI;

/// Wrap `x` into `[low, low + span)`.
///
/// Values already in range are returned unchanged, so normalizing twice is
/// the same as normalizing once.
pub fn normalize_range(x: f64, low: f64, span: f64) -> f64 {
    let high = low + span;
    if (low..high).contains(&x) || !x.is_finite() {
        return x;
    }
    let mut v = x - span * floor((x - low) / span);
    if v >= high {
        v -= span;
    }
    if v < low {
        v += span;
    }
    if v >= high {
        v = low;
    }
    v
}

/// Wrap into `[-pi, pi)`.
#[inline]
pub fn normalize_pm_pi(x: f64) -> f64 {
    normalize_range(x, -PI, TAU)
}

/// Wrap into `[0, 2pi)`.
#[inline]
pub fn normalize_2pi(x: f64) -> f64 {
    normalize_range(x, 0.0, TAU)
}

/// Signed difference `a - b` wrapped into `[-pi, pi)`.
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    normalize_pm_pi(a - b)
}
