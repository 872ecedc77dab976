//! Soft limit configuration and types.

use serde::Deserialize;

use super::units::Degrees;

/// Axis soft limits in degrees of instrument coordinate (from configuration).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoftLimits {
    /// Minimum allowed position in degrees.
    #[serde(rename = "min_degrees")]
    pub min: Degrees,

    /// Maximum allowed position in degrees.
    #[serde(rename = "max_degrees")]
    pub max: Degrees,
}

impl SoftLimits {
    /// Create new soft limits.
    pub fn new(min: Degrees, max: Degrees) -> Self {
        Self { min, max }
    }

    /// Check if limits are valid (min < max).
    pub fn is_valid(&self) -> bool {
        self.min.0 < self.max.0
    }

    /// Check if a position is within limits.
    pub fn contains(&self, position: Degrees) -> bool {
        position.0 >= self.min.0 && position.0 <= self.max.0
    }

    /// Convert to measure (radian) limits.
    pub fn to_measures(&self) -> MeasureLimits {
        MeasureLimits {
            min: self.min.to_radians(),
            max: self.max.to_radians(),
        }
    }
}

impl Default for SoftLimits {
    fn default() -> Self {
        Self::new(Degrees(-180.0), Degrees(180.0))
    }
}

/// Soft limits in measures (for runtime use).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureLimits {
    /// Minimum position in measures.
    pub min: f64,
    /// Maximum position in measures.
    pub max: f64,
}

impl MeasureLimits {
    /// Check if a position is within limits.
    pub fn contains(&self, measure: f64) -> bool {
        measure >= self.min && measure <= self.max
    }
}

/// Mount-level pointing limits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MountLimits {
    /// Lowest allowed altitude.
    #[serde(rename = "horizon_deg", default = "default_horizon")]
    pub horizon: Degrees,

    /// Highest allowed altitude.
    #[serde(rename = "overhead_deg", default = "default_overhead")]
    pub overhead: Degrees,

    /// How far past the meridian the East pier side may track.
    #[serde(rename = "past_meridian_east_deg", default = "default_past_meridian")]
    pub past_meridian_east: Degrees,

    /// How far past the meridian the West pier side may track.
    #[serde(rename = "past_meridian_west_deg", default = "default_past_meridian")]
    pub past_meridian_west: Degrees,
}

fn default_horizon() -> Degrees {
    Degrees(-10.0)
}

fn default_overhead() -> Degrees {
    Degrees(90.0)
}

fn default_past_meridian() -> Degrees {
    Degrees(15.0)
}

impl Default for MountLimits {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            overhead: default_overhead(),
            past_meridian_east: default_past_meridian(),
            past_meridian_west: default_past_meridian(),
        }
    }
}
