//! Mount-level configuration.

use serde::Deserialize;

use super::units::Degrees;
use crate::transform::PierSide;

/// Mechanical mount geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MountType {
    /// German equatorial: axis 1 is hour angle, axis 2 declination, with meridian flips.
    #[default]
    Gem,
    /// Fork equatorial: no pier-side folding.
    Fork,
    /// Altitude-azimuth: axis 1 is azimuth, axis 2 altitude.
    AltAzm,
}

/// Whether a GEM may change pier side automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeridianFlip {
    /// Stay on the current pier side.
    Never,
    /// Flip when the preference or the limits require it.
    #[default]
    Always,
}

/// Caller's pier side preference for a goto or sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PierSideSelect {
    /// Prefer East, fall back to West.
    East,
    /// Prefer West, fall back to East.
    West,
    /// Keep the current side when reachable.
    #[default]
    Best,
    /// East or fail.
    EastOnly,
    /// West or fail.
    WestOnly,
    /// Current side or fail.
    SameOnly,
}

/// Tracking rate compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompensationMode {
    /// Plain sidereal on axis 1.
    #[default]
    None,
    /// Follow atmospheric refraction on both axes.
    Refraction,
    /// Follow refraction and the pointing model on both axes.
    Full,
}

/// `[mount]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MountConfig {
    /// Mount geometry.
    #[serde(rename = "type", default)]
    pub mount_type: MountType,

    /// Meridian flip policy.
    #[serde(default)]
    pub meridian_flip: MeridianFlip,

    /// Pier side preference used by the protocol goto.
    #[serde(default)]
    pub preferred_pier_side: PierSideSelect,

    /// Skip the intermediate waypoint during meridian flips.
    #[serde(default)]
    pub flip_skip_waypoint: bool,

    /// Rate of `Mount::poll` calls in Hz.
    #[serde(default = "default_poll_hz")]
    pub poll_hz: u16,

    /// Tracking rate compensation.
    #[serde(default)]
    pub tracking_compensation: CompensationMode,

    /// Guide rate as a multiple of sidereal.
    #[serde(default = "default_guide_rate")]
    pub guide_rate: f64,
}

fn default_poll_hz() -> u16 {
    100
}

fn default_guide_rate() -> f64 {
    0.5
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            mount_type: MountType::default(),
            meridian_flip: MeridianFlip::default(),
            preferred_pier_side: PierSideSelect::default(),
            flip_skip_waypoint: false,
            poll_hz: default_poll_hz(),
            tracking_compensation: CompensationMode::default(),
            guide_rate: default_guide_rate(),
        }
    }
}

/// Saved park position, `[park]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ParkConfig {
    /// Hour angle.
    #[serde(rename = "hour_angle_deg")]
    pub hour_angle: Degrees,
    /// Declination.
    #[serde(rename = "declination_deg")]
    pub declination: Degrees,
    /// Pier side.
    #[serde(default = "default_park_side")]
    pub pier_side: PierSide,
}

fn default_park_side() -> PierSide {
    PierSide::East
}
