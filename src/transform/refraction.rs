//! Atmospheric refraction.

use libm::tan;

use crate::config::SiteConfig;

/// Lowest altitude the model is evaluated at (-1 degree).
const MIN_ALTITUDE: f64 = -0.017_453_292_519_943_295;

/// Atmospheric conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Pressure in millibars.
    pub pressure: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self { pressure: 1010.0, temperature: 10.0 }
    }
}

impl Atmosphere {
    /// Conditions from site configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self { pressure: config.pressure, temperature: config.temperature }
    }

    fn scale(&self) -> f64 {
        (self.pressure / 1010.0) * (283.0 / (273.0 + self.temperature))
    }

    /// Refraction for a true (unrefracted) altitude, in radians.
    pub fn true_refraction(&self, altitude: f64) -> f64 {
        let h = altitude.max(MIN_ALTITUDE);
        let r = 2.967e-4 * self.scale() / tan(h + 0.003_137_6 / (h + 0.089_186));
        r.max(0.0)
    }

    /// Refraction for an observed (refracted) altitude, in radians.
    pub fn apparent_refraction(&self, altitude: f64) -> f64 {
        self.true_refraction(altitude - self.true_refraction(altitude))
    }
}

/// Refraction for a true altitude with the given pressure and temperature.
pub fn true_refraction(altitude: f64, pressure: f64, temperature: f64) -> f64 {
    Atmosphere { pressure, temperature }.true_refraction(altitude)
}

/// Refraction for an observed altitude with the given pressure and temperature.
pub fn apparent_refraction(altitude: f64, pressure: f64, temperature: f64) -> f64 {
    Atmosphere { pressure, temperature }.apparent_refraction(altitude)
}
