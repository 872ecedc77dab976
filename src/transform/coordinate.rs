//! Coordinates and pier side.

use serde::Deserialize;

/// Side of the pier the telescope tube is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PierSide {
    /// Not applicable (alt-az) or unknown.
    #[default]
    None,
    /// Normal side for targets east of the meridian (negative hour angle).
    East,
    /// Normal side for targets west of the meridian; axis 1 turned half a revolution.
    West,
}

/// A sky position in one reference frame.
///
/// All angles in radians. Only the fields of the frame in use are
/// meaningful; conversions fill the others.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    /// Hour angle, `[-pi, pi)`.
    pub h: f64,
    /// Declination, `[-pi/2, pi/2]`.
    pub d: f64,
    /// Right ascension, `[0, 2pi)`.
    pub r: f64,
    /// Altitude, `[-pi/2, pi/2]`.
    pub a: f64,
    /// Azimuth from north through east, `[0, 2pi)`.
    pub z: f64,
    /// Pier side.
    pub pier_side: PierSide,
}

impl Coordinate {
    /// Equatorial coordinate from hour angle and declination.
    pub fn equatorial(h: f64, d: f64) -> Self {
        Self { h, d, ..Default::default() }
    }

    /// Horizon coordinate from altitude and azimuth.
    pub fn horizon(a: f64, z: f64) -> Self {
        Self { a, z, ..Default::default() }
    }

    /// Same coordinate on `side`.
    pub fn on_side(mut self, side: PierSide) -> Self {
        self.pier_side = side;
        self
    }
}
