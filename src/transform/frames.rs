//! Frame pipeline between native sky coordinates and axis instrument angles.
//!
//! ```text
//! native (topocentric) -> observed (refraction) -> mount (pointing model) -> instrument (pier folding)
//! ```

use core::f64::consts::{FRAC_PI_2, PI};

use libm::fabs;

use super::angle::{normalize_pm_pi, normalize_range, TAU};
use super::coordinate::{Coordinate, PierSide};
use super::refraction::Atmosphere;
use super::site::Site;
use crate::config::{MountType, SystemConfig};

/// Float slack on axis 2 at the pole, far below one step.
const POLE_TOLERANCE: f64 = 1e-9;

/// Hook for pointing corrections between observed and mount coordinates.
pub trait PointingModel {
    /// Observed to mount.
    fn apply(&self, coord: Coordinate) -> Coordinate;

    /// Mount to observed.
    fn remove(&self, coord: Coordinate) -> Coordinate;
}

/// Identity pointing model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPointingModel;

impl PointingModel for NoPointingModel {
    #[inline]
    fn apply(&self, coord: Coordinate) -> Coordinate {
        coord
    }

    #[inline]
    fn remove(&self, coord: Coordinate) -> Coordinate {
        coord
    }
}

/// Coordinate conversions for one site and mount geometry.
#[derive(Debug, Clone)]
pub struct Transform<M: PointingModel = NoPointingModel> {
    site: Site,
    mount_type: MountType,
    atmosphere: Option<Atmosphere>,
    model: M,
}

impl Transform<NoPointingModel> {
    /// Transform without pointing corrections. `atmosphere` of `None` disables refraction.
    pub fn new(site: Site, mount_type: MountType, atmosphere: Option<Atmosphere>) -> Self {
        Self { site, mount_type, atmosphere, model: NoPointingModel }
    }

    /// Transform from system configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        let atmosphere = config
            .site
            .refraction
            .then(|| Atmosphere::from_config(&config.site));
        Self::new(Site::from_config(&config.site), config.mount.mount_type, atmosphere)
    }
}

impl<M: PointingModel> Transform<M> {
    /// Replace the pointing model.
    pub fn with_pointing_model<N: PointingModel>(self, model: N) -> Transform<N> {
        Transform {
            site: self.site,
            mount_type: self.mount_type,
            atmosphere: self.atmosphere,
            model,
        }
    }

    /// Observing site.
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Mount geometry.
    pub fn mount_type(&self) -> MountType {
        self.mount_type
    }

    /// Pointing model in use.
    pub fn pointing_model(&self) -> &M {
        &self.model
    }

    /// Fill horizon coordinates from equatorial ones.
    pub fn equ_to_hor(&self, coord: &mut Coordinate) {
        self.site.equ_to_hor(coord);
    }

    /// Fill equatorial coordinates from horizon ones.
    pub fn hor_to_equ(&self, coord: &mut Coordinate) {
        self.site.hor_to_equ(coord);
    }

    /// Add refraction to an equatorial coordinate. Horizon fields are filled.
    pub fn topocentric_to_observed(&self, coord: Coordinate) -> Coordinate {
        let mut c = coord;
        self.site.equ_to_hor(&mut c);
        if let Some(atm) = &self.atmosphere {
            c.a += atm.true_refraction(c.a);
            self.site.hor_to_equ(&mut c);
        }
        c
    }

    /// Remove refraction from an equatorial coordinate. Horizon fields are filled.
    pub fn observed_to_topocentric(&self, coord: Coordinate) -> Coordinate {
        let mut c = coord;
        self.site.equ_to_hor(&mut c);
        if let Some(atm) = &self.atmosphere {
            c.a -= atm.apparent_refraction(c.a);
            self.site.hor_to_equ(&mut c);
        }
        c
    }

    /// Native sky position to mount coordinates.
    pub fn native_to_mount(&self, coord: &Coordinate) -> Coordinate {
        let mut c = self.model.apply(self.topocentric_to_observed(*coord));
        self.site.equ_to_hor(&mut c);
        c.pier_side = coord.pier_side;
        c
    }

    /// Mount coordinates to native sky position.
    pub fn mount_to_native(&self, coord: &Coordinate) -> Coordinate {
        let mut c = self.observed_to_topocentric(self.model.remove(*coord));
        c.pier_side = coord.pier_side;
        c
    }

    /// Axis angles for a mount coordinate on its pier side.
    ///
    /// On the west side of a GEM axis 1 is turned half a revolution and
    /// axis 2 mirrored through the pole, so both stay continuous.
    pub fn mount_to_instrument(&self, coord: &Coordinate) -> (f64, f64) {
        match self.mount_type {
            MountType::AltAzm => (normalize_pm_pi(coord.z), coord.a),
            MountType::Fork => (normalize_pm_pi(coord.h), coord.d),
            MountType::Gem => {
                let north = self.site.is_northern();
                let (a1, a2) = if coord.pier_side == PierSide::West {
                    let a2 = if north { PI - coord.d } else { -PI - coord.d };
                    (coord.h - PI, a2)
                } else {
                    (coord.h, coord.d)
                };
                let a1 = normalize_range(a1, -3.0 * FRAC_PI_2, TAU);
                let a2 = if north {
                    normalize_range(a2, -FRAC_PI_2, TAU)
                } else {
                    normalize_range(a2, -3.0 * FRAC_PI_2, TAU)
                };
                (a1, a2)
            }
        }
    }

    /// Mount coordinate for axis angles. Both coordinate systems are filled.
    pub fn instrument_to_mount(&self, axis1: f64, axis2: f64) -> Coordinate {
        let mut c = match self.mount_type {
            MountType::AltAzm => {
                let mut c = Coordinate::horizon(axis2, normalize_range(axis1, 0.0, TAU));
                self.site.hor_to_equ(&mut c);
                return c;
            }
            MountType::Fork => Coordinate::equatorial(normalize_pm_pi(axis1), axis2)
                .on_side(PierSide::East),
            MountType::Gem => {
                let a2 = normalize_pm_pi(axis2);
                // the pole itself reads as the east side
                if fabs(a2) > FRAC_PI_2 + POLE_TOLERANCE {
                    let d = if self.site.is_northern() { PI - a2 } else { -PI - a2 };
                    Coordinate::equatorial(normalize_pm_pi(axis1 + PI), normalize_pm_pi(d))
                        .on_side(PierSide::West)
                } else {
                    Coordinate::equatorial(normalize_pm_pi(axis1), a2).on_side(PierSide::East)
                }
            }
        };
        self.site.equ_to_hor(&mut c);
        c
    }
}
