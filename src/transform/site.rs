//! Observing site, sidereal time and equatorial/horizon conversion.

use core::f64::consts::FRAC_PI_2;

use libm::{asin, atan2, cos, fabs, sin};

use super::angle::{normalize_2pi, normalize_pm_pi};
use super::coordinate::Coordinate;
use crate::config::SiteConfig;

/// Below this cosine the pole (or zenith) is treated as a singular point.
const POLE_GUARD: f64 = 1e-12;

/// Source of Greenwich mean sidereal time.
pub trait SiderealClock {
    /// Greenwich sidereal time in radians, `[0, 2pi)`.
    fn greenwich_sidereal_time(&self) -> f64;
}

/// Observing site with cached latitude sine and cosine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    latitude: f64,
    longitude: f64,
    sin_lat: f64,
    cos_lat: f64,
}

impl Site {
    /// Site at `latitude`, `longitude` (radians, east positive).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            sin_lat: sin(latitude),
            cos_lat: cos(latitude),
        }
    }

    /// Site from configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.latitude.to_radians(), config.longitude.to_radians())
    }

    /// Latitude in radians.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in radians, east positive.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether the site is in the northern hemisphere (equator counts as north).
    #[inline]
    pub fn is_northern(&self) -> bool {
        self.latitude >= 0.0
    }

    /// Local sidereal time for a Greenwich sidereal time.
    pub fn local_sidereal_time(&self, gmst: f64) -> f64 {
        normalize_2pi(gmst + self.longitude)
    }

    /// Hour angle of right ascension `ra`.
    pub fn hour_angle(&self, ra: f64, gmst: f64) -> f64 {
        normalize_pm_pi(self.local_sidereal_time(gmst) - ra)
    }

    /// Right ascension at hour angle `h`.
    pub fn right_ascension(&self, h: f64, gmst: f64) -> f64 {
        normalize_2pi(self.local_sidereal_time(gmst) - h)
    }

    /// Fill `a` and `z` from `h` and `d`.
    pub fn equ_to_hor(&self, coord: &mut Coordinate) {
        let (sin_h, cos_h) = (sin(coord.h), cos(coord.h));
        let (sin_d, cos_d) = (sin(coord.d), cos(coord.d));

        let sin_a = sin_d * self.sin_lat + cos_d * self.cos_lat * cos_h;
        coord.a = asin(sin_a.clamp(-1.0, 1.0));

        let y = -cos_d * sin_h;
        let x = sin_d * self.cos_lat - cos_d * self.sin_lat * cos_h;
        coord.z = if fabs(x) < POLE_GUARD && fabs(y) < POLE_GUARD {
            0.0
        } else {
            normalize_2pi(atan2(y, x))
        };
    }

    /// Fill `h` and `d` from `a` and `z`.
    pub fn hor_to_equ(&self, coord: &mut Coordinate) {
        let (sin_z, cos_z) = (sin(coord.z), cos(coord.z));
        let (sin_a, cos_a) = (sin(coord.a), cos(coord.a));

        let sin_d = sin_a * self.sin_lat + cos_a * self.cos_lat * cos_z;
        coord.d = asin(sin_d.clamp(-1.0, 1.0));

        let y = -cos_a * sin_z;
        let x = sin_a * self.cos_lat - cos_a * self.sin_lat * cos_z;
        coord.h = if fabs(x) < POLE_GUARD && fabs(y) < POLE_GUARD {
            0.0
        } else {
            normalize_pm_pi(atan2(y, x))
        };
        if fabs(fabs(coord.d) - FRAC_PI_2) < POLE_GUARD {
            coord.h = 0.0;
        }
    }
}
