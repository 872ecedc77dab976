//! Velocity ramp calculation.
//!
//! The ramp state machine advances once per poll. Frequencies are in
//! measures per second; `RampByDistance` frequencies are magnitudes, all
//! others are signed.

use libm::{fabs, sqrt};

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing step count.
    Forward,
    /// Decreasing step count.
    Reverse,
}

impl Direction {
    /// Get direction from a signed value, `None` for zero.
    #[inline]
    pub fn from_sign(value: i64) -> Option<Self> {
        match value {
            v if v > 0 => Some(Direction::Forward),
            v if v < 0 => Some(Direction::Reverse),
            _ => None,
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Velocity ramp state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampMode {
    /// No ramp; only the base rate (if any) is applied.
    #[default]
    Idle,
    /// Slewing to the target, speed set by distance from origin and target.
    RampByDistance,
    /// Accelerating forward at a fixed rate per poll.
    RampByTimeForward,
    /// Accelerating in reverse at a fixed rate per poll.
    RampByTimeReverse,
    /// Normal deceleration to rest.
    DecelerateToStop,
    /// Emergency deceleration to rest.
    DecelerateAbort,
}

impl RampMode {
    /// Whether a ramp is in progress.
    #[inline]
    pub fn is_active(self) -> bool {
        self != RampMode::Idle
    }

    /// Whether the ramp is decelerating.
    #[inline]
    pub fn is_decelerating(self) -> bool {
        matches!(self, RampMode::DecelerateToStop | RampMode::DecelerateAbort)
    }
}

/// Frequency for a move ramped by distance.
///
/// `f = sqrt(2 a d)` where `d` is the smaller of the distances travelled from
/// the origin and left to the target, floored at `floor` and capped at `cruise`.
pub fn distance_frequency(
    acceleration: f64,
    from_origin: f64,
    to_target: f64,
    floor: f64,
    cruise: f64,
) -> f64 {
    let distance = if from_origin < to_target { from_origin } else { to_target };
    let f = sqrt(2.0 * acceleration * fabs(distance));
    f.max(floor).min(cruise)
}

/// Move `frequency` towards `target` by at most `step`.
pub fn approach(frequency: f64, target: f64, step: f64) -> f64 {
    if frequency < target {
        (frequency + step).min(target)
    } else {
        (frequency - step).max(target)
    }
}

/// Tick period for a commanded frequency, in sixteenths of a microsecond.
///
/// The tick produces half a step pulse per call, so the period is half the
/// step interval. Zero means stopped.
pub fn tick_period_sub_micros(frequency: f64, steps_per_measure: f64, step_size: i64) -> u32 {
    let steps_per_second = fabs(frequency) * steps_per_measure / step_size.max(1) as f64;
    if steps_per_second <= 0.0 {
        return 0;
    }
    let period = 16.0 * 1_000_000.0 / (2.0 * steps_per_second);
    if period >= u32::MAX as f64 {
        u32::MAX
    } else {
        (period as u32).max(1)
    }
}
