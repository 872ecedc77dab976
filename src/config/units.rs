//! Unit types for physical quantities.
//!
//! Provides type-safe representations of angles, angular rates and motor
//! steps to prevent unit confusion at compile time. Configuration is written
//! in degrees; axes work internally in radians ("measures").

use serde::Deserialize;

use crate::error::ConfigError;

/// Angular position in degrees.
///
/// Used for configuration and user-facing API. Internally converted to radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians.
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Small angle in arc-seconds (backlash, guide offsets).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Arcseconds(pub f64);

impl Arcseconds {
    /// Convert to radians.
    #[inline]
    pub fn to_radians(self) -> f64 {
        (self.0 / 3600.0).to_radians()
    }
}

/// Angular velocity in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct DegreesPerSec(pub f64);

impl DegreesPerSec {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians per second.
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Angular acceleration in degrees per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct DegreesPerSecSquared(pub f64);

impl DegreesPerSecSquared {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians per second squared.
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Motor position in steps (absolute from the motor origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Convert to measures using a steps-per-measure ratio.
    #[inline]
    pub fn to_measure(self, steps_per_measure: f64) -> f64 {
        self.0 as f64 / steps_per_measure
    }

    /// Create from measures using a steps-per-measure ratio, rounding to the nearest step.
    #[inline]
    pub fn from_measure(measure: f64, steps_per_measure: f64) -> Self {
        Self(round_to_i64(measure * steps_per_measure))
    }
}

/// Round half away from zero without std.
#[inline]
pub(crate) fn round_to_i64(value: f64) -> i64 {
    libm::round(value) as i64
}

/// Microstep divisor (1, 2, 4, 8, 16, 32, 64, 128, 256).
///
/// Validated at construction to be a power of 2 within the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// Thirty-second step.
    pub const THIRTY_SECOND: Self = Self(32);
    /// Sixty-fourth step.
    pub const SIXTY_FOURTH: Self = Self(64);
    /// 128th step.
    pub const ONE_TWENTY_EIGHTH: Self = Self(128);
    /// 256th step (maximum resolution).
    pub const TWO_FIFTY_SIXTH: Self = Self(256);

    /// Valid microstep values.
    const VALID_VALUES: [u16; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Number of tracking-mode microsteps covered by one slew-mode microstep.
    ///
    /// Returns `None` when `slew` is finer than `self`.
    pub fn ratio_to(self, slew: Microsteps) -> Option<u16> {
        if slew.0 > self.0 {
            None
        } else {
            Some(self.0 / slew.0)
        }
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
