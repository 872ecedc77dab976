//! Axis settings derived from axis configuration.

use super::axis::AxisConfig;
use super::limits::MeasureLimits;
use super::units::{round_to_i64, Steps};

/// Derived per-axis parameters, in measures (radians) and steps.
///
/// These are computed once at initialization and stay fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSettings {
    /// Steps per measure (radian), counted in tracking microsteps.
    pub steps_per_measure: f64,

    /// Invert the direction pin.
    pub reverse: bool,

    /// Instrument coordinate limits.
    pub limits: MeasureLimits,

    /// Backlash amount in steps.
    pub backlash_steps: i64,

    /// Backlash takeup frequency in measures per second.
    pub backlash_freq: f64,

    /// Slew cruise frequency in measures per second.
    pub slew_freq: f64,

    /// Acceleration in measures per second squared.
    pub acceleration: f64,

    /// Abort deceleration in measures per second squared.
    pub abort_deceleration: f64,

    /// Slowest homing frequency in measures per second.
    pub min_freq: f64,

    /// Poll rate in Hz.
    pub poll_hz: f64,

    /// Tracking microsteps per slew microstep.
    pub microstep_ratio: Option<u16>,

    /// Park positions are snapped to multiples of this many steps.
    pub park_modulus: i64,
}

impl AxisSettings {
    /// Compute axis settings from axis configuration.
    pub fn from_config(config: &AxisConfig, poll_hz: u16) -> Self {
        let steps_per_measure = config.steps_per_measure();
        let slew_freq = config.slew_rate.to_radians();
        let acceleration = config.acceleration.to_radians();

        let backlash_freq = config
            .backlash_rate
            .map(|r| r.to_radians())
            .unwrap_or(slew_freq / 8.0);

        let abort_deceleration = config
            .abort_deceleration
            .map(|a| a.to_radians())
            .unwrap_or(acceleration * 2.0);

        let min_freq = config
            .min_rate
            .map(|r| r.to_radians())
            .unwrap_or(backlash_freq / 4.0);

        Self {
            steps_per_measure,
            reverse: config.reverse,
            limits: config.limits.to_measures(),
            backlash_steps: round_to_i64(config.backlash.to_radians() * steps_per_measure),
            backlash_freq,
            slew_freq,
            acceleration,
            abort_deceleration,
            min_freq,
            poll_hz: f64::from(poll_hz.max(1)),
            microstep_ratio: config.microstep_ratio(),
            park_modulus: config
                .tracking_microsteps
                .map(|m| i64::from(m.value()))
                .unwrap_or(1),
        }
    }

    /// Convert measures to steps.
    #[inline]
    pub fn measure_to_steps(&self, measure: f64) -> i64 {
        Steps::from_measure(measure, self.steps_per_measure).value()
    }

    /// Convert steps to measures.
    #[inline]
    pub fn steps_to_measure(&self, steps: i64) -> f64 {
        Steps::new(steps).to_measure(self.steps_per_measure)
    }

    /// Frequency change per poll while accelerating or stopping.
    #[inline]
    pub fn accel_per_poll(&self) -> f64 {
        self.acceleration / self.poll_hz
    }

    /// Frequency change per poll while aborting.
    #[inline]
    pub fn abort_per_poll(&self) -> f64 {
        self.abort_deceleration / self.poll_hz
    }

    /// Distance covered while accelerating from rest to the slew frequency.
    #[inline]
    pub fn accel_distance(&self) -> f64 {
        self.slew_freq * self.slew_freq / (2.0 * self.acceleration)
    }
}
