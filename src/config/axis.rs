//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::SoftLimits;
use super::pins::AxisSenses;
use super::units::{Arcseconds, DegreesPerSec, DegreesPerSecSquared, Microsteps};

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Motor steps per degree of instrument rotation, counted in tracking microsteps.
    pub steps_per_degree: f64,

    /// Invert direction pin logic.
    #[serde(default)]
    pub reverse: bool,

    /// Soft limits of the instrument coordinate.
    #[serde(default)]
    pub limits: SoftLimits,

    /// Mechanical backlash.
    #[serde(default, rename = "backlash_arcsec")]
    pub backlash: Arcseconds,

    /// Rate at which backlash is taken up; also the slowest ramp speed.
    #[serde(default, rename = "backlash_rate_deg_per_sec")]
    pub backlash_rate: Option<DegreesPerSec>,

    /// Cruise rate for slews.
    #[serde(rename = "slew_rate_deg_per_sec")]
    pub slew_rate: DegreesPerSec,

    /// Acceleration used for slews and normal stops.
    #[serde(rename = "acceleration_deg_per_sec2")]
    pub acceleration: DegreesPerSecSquared,

    /// Deceleration used for emergency stops. Defaults to twice the acceleration.
    #[serde(default, rename = "abort_deceleration_deg_per_sec2")]
    pub abort_deceleration: Option<DegreesPerSecSquared>,

    /// Slowest rate used by sensor homing.
    #[serde(default, rename = "min_rate_deg_per_sec")]
    pub min_rate: Option<DegreesPerSec>,

    /// Driver microstep setting while tracking.
    #[serde(default)]
    pub tracking_microsteps: Option<Microsteps>,

    /// Driver microstep setting while slewing (coarser than tracking).
    #[serde(default)]
    pub slew_microsteps: Option<Microsteps>,

    /// Home and limit sense inputs.
    #[serde(default)]
    pub senses: AxisSenses,
}

impl AxisConfig {
    /// Tracking microsteps per slew microstep, when mode switching is configured.
    pub fn microstep_ratio(&self) -> Option<u16> {
        match (self.tracking_microsteps, self.slew_microsteps) {
            (Some(tracking), Some(slew)) => tracking.ratio_to(slew).filter(|r| *r > 1),
            _ => None,
        }
    }

    /// Steps per radian.
    pub fn steps_per_measure(&self) -> f64 {
        self.steps_per_degree * 180.0 / core::f64::consts::PI
    }
}
