//! Mount state machine types.

use core::f64::consts::PI;

/// Sidereal rate in radians per second.
pub const SIDEREAL_RATE: f64 = 2.0 * PI / 86_164.090_5;

/// Goto state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GotoState {
    /// No goto.
    #[default]
    None,
    /// Slewing to a target.
    Goto,
    /// Slewing to the other pier side before a sync.
    GotoSync,
    /// Decelerating after a stop request.
    Abort,
}

impl GotoState {
    /// Whether a goto or flip-sync is slewing.
    #[inline]
    pub fn is_slewing(self) -> bool {
        matches!(self, GotoState::Goto | GotoState::GotoSync)
    }
}

/// Leg of a goto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GotoStage {
    /// No goto.
    #[default]
    None,
    /// Heading for the meridian flip waypoint.
    Waypoint,
    /// Heading for the destination.
    Destination,
}

/// Park state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParkState {
    /// Normal operation.
    #[default]
    Unparked,
    /// Slewing to the park position.
    Parking,
    /// At the park position with motors off.
    Parked,
    /// The park goto did not complete. Cleared by `park_reset`.
    ParkFailed,
}

/// Tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackingState {
    /// Not tracking.
    #[default]
    None,
    /// Following the sky at the selected rate.
    Sidereal,
}

/// Tracking rate preset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackingRate {
    /// Stars.
    #[default]
    Sidereal,
    /// Moon.
    Lunar,
    /// Sun.
    Solar,
    /// King rate, sidereal corrected for mean refraction.
    King,
    /// Custom multiple of sidereal.
    Custom(f64),
}

impl TrackingRate {
    /// Multiple of the sidereal rate.
    pub fn multiplier(self) -> f64 {
        match self {
            TrackingRate::Sidereal => 1.0,
            TrackingRate::Lunar => 57.900 / 60.164,
            TrackingRate::Solar => 60.0 / 60.164,
            TrackingRate::King => 60.136 / 60.164,
            TrackingRate::Custom(m) => m,
        }
    }
}

/// Guide pulse direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuideDirection {
    /// Towards the north celestial pole.
    North,
    /// Towards the south celestial pole.
    South,
    /// Towards increasing right ascension.
    East,
    /// Towards decreasing right ascension.
    West,
}

/// Why tracking was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MountFault {
    /// Below the horizon limit.
    Horizon,
    /// Above the overhead limit.
    Overhead,
    /// Past the meridian limit on the east pier side.
    MeridianEast,
    /// Past the meridian limit on the west pier side.
    MeridianWest,
    /// An axis left its soft limits.
    AxisLimit,
    /// A driver reported a fault.
    Driver,
}

/// What happens when a goto arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Arrival {
    /// Start tracking.
    #[default]
    Track,
    /// Power down and mark parked.
    Park,
    /// Stay put without tracking.
    Home,
    /// Write the sync coordinates, then track.
    Sync,
}

/// An active guide pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Guide {
    pub(crate) axis1_rate: f64,
    pub(crate) axis2_rate: f64,
    pub(crate) remaining_ms: i64,
}
