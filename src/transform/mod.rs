//! Coordinate transform module for mount-motion.
//!
//! Pure conversions between native (topocentric) sky coordinates, observed
//! coordinates (with refraction), mount coordinates (with the pointing model)
//! and per-axis instrument angles. No device state lives here.

mod angle;
mod coordinate;
mod frames;
mod refraction;
mod site;

pub use angle::{angle_difference, normalize_2pi, normalize_pm_pi, normalize_range, TAU};
pub use coordinate::{Coordinate, PierSide};
pub use frames::{NoPointingModel, PointingModel, Transform};
pub use refraction::{apparent_refraction, true_refraction, Atmosphere};
pub use site::{SiderealClock, Site};
