//! Observing site configuration.

use serde::Deserialize;

use super::units::Degrees;

/// Observing site and atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SiteConfig {
    /// Geographic latitude, north positive.
    #[serde(rename = "latitude_deg")]
    pub latitude: Degrees,

    /// Geographic longitude, east positive.
    #[serde(rename = "longitude_deg", default)]
    pub longitude: Degrees,

    /// Barometric pressure in millibars.
    #[serde(rename = "pressure_mb", default = "default_pressure")]
    pub pressure: f64,

    /// Ambient temperature in degrees Celsius.
    #[serde(rename = "temperature_c", default = "default_temperature")]
    pub temperature: f64,

    /// Apply atmospheric refraction when converting targets.
    #[serde(default = "default_refraction")]
    pub refraction: bool,
}

fn default_pressure() -> f64 {
    1010.0
}

fn default_temperature() -> f64 {
    10.0
}

fn default_refraction() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude: Degrees(0.0),
            longitude: Degrees(0.0),
            pressure: default_pressure(),
            temperature: default_temperature(),
            refraction: default_refraction(),
        }
    }
}
