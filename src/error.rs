//! Error types for mount-motion.
//!
//! Provides unified error handling across configuration, axis control and mount commands.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Result of a motion command (axis or mount level).
pub type CommandResult<T = ()> = core::result::Result<T, CommandError>;

/// Unified error type for all mount-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion command rejected or failed
    Command(CommandError),
    /// Low-level motor output error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Steps per degree must be > 0
    InvalidStepsPerDegree(f64),
    /// Invalid slew rate (must be > 0)
    InvalidSlewRate(f64),
    /// Invalid acceleration or deceleration (must be > 0)
    InvalidAcceleration(f64),
    /// Invalid soft limits (min must be < max)
    InvalidSoftLimits {
        /// Minimum limit value
        min: f64,
        /// Maximum limit value
        max: f64,
    },
    /// Slew microsteps must be coarser than (or equal to) tracking microsteps
    InvalidMicrostepRatio {
        /// Tracking-mode microsteps
        tracking: u16,
        /// Slew-mode microsteps
        slew: u16,
    },
    /// Site latitude outside [-90, 90]
    InvalidLatitude(f64),
    /// Site longitude outside [-180, 180]
    InvalidLongitude(f64),
    /// Altitude limits out of order or outside [-90, 90]
    InvalidAltitudeLimits {
        /// Minimum altitude
        min: f64,
        /// Maximum altitude
        max: f64,
    },
    /// Past-meridian limit outside [-180, 180]
    InvalidMeridianLimit(f64),
    /// Poll rate must be > 0
    InvalidPollRate(u16),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Errors surfaced by axis and mount commands.
///
/// All of these are recoverable; none of them leave the mount in an undefined state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Axis (or mount) is powered down
    SlewInStandby,
    /// Mount is parked or parking
    SlewInPark,
    /// A guide pulse or manual motion is active
    SlewInMotion,
    /// A goto is already in progress
    SlewInSlew,
    /// Target is below the horizon limit
    BelowHorizon,
    /// Target is above the overhead limit
    AboveOverhead,
    /// Target or direction is outside the axis/meridian limits
    OutsideLimits,
    /// Driver fault (over-current, stall, ...)
    HardwareFault,
    /// Parameter out of range
    ParamRange,
    /// Parameter malformed
    ParamForm,
    /// Park previously failed and has not been reset
    ParkFailed,
    /// Operation requires a parked mount
    NotParked,
    /// No park position has been saved
    NoParkPositionSet,
    /// Capability not available on this axis (e.g. no home sense)
    NotSupported,
}

/// Low-level motor output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// STEP or DIR pin operation failed
    Pin,
}

impl CommandError {
    /// LX200-style numeric reply code for goto requests (`0` is success).
    pub fn goto_code(self) -> u8 {
        match self {
            CommandError::BelowHorizon => 1,
            CommandError::SlewInStandby => 3,
            CommandError::SlewInPark | CommandError::ParkFailed | CommandError::NotParked => 4,
            CommandError::SlewInSlew => 5,
            CommandError::OutsideLimits | CommandError::AboveOverhead => 6,
            CommandError::HardwareFault => 7,
            CommandError::SlewInMotion => 8,
            _ => 9,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::InvalidStepsPerDegree(v) => {
                write!(f, "Invalid steps per degree: {}. Must be > 0", v)
            }
            ConfigError::InvalidSlewRate(v) => write!(f, "Invalid slew rate: {}. Must be > 0", v),
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidSoftLimits { min, max } => {
                write!(f, "Invalid soft limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidMicrostepRatio { tracking, slew } => write!(
                f,
                "Invalid microstep ratio: slew microsteps ({}) must divide tracking microsteps ({})",
                slew, tracking
            ),
            ConfigError::InvalidLatitude(v) => write!(f, "Invalid latitude: {}", v),
            ConfigError::InvalidLongitude(v) => write!(f, "Invalid longitude: {}", v),
            ConfigError::InvalidAltitudeLimits { min, max } => {
                write!(f, "Invalid altitude limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidMeridianLimit(v) => write!(f, "Invalid past-meridian limit: {}", v),
            ConfigError::InvalidPollRate(v) => write!(f, "Invalid poll rate: {}. Must be > 0", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CommandError::SlewInStandby => "axis in standby",
            CommandError::SlewInPark => "mount parked",
            CommandError::SlewInMotion => "mount in motion",
            CommandError::SlewInSlew => "goto in progress",
            CommandError::BelowHorizon => "target below horizon limit",
            CommandError::AboveOverhead => "target above overhead limit",
            CommandError::OutsideLimits => "outside limits",
            CommandError::HardwareFault => "hardware fault",
            CommandError::ParamRange => "parameter out of range",
            CommandError::ParamForm => "parameter malformed",
            CommandError::ParkFailed => "park failed",
            CommandError::NotParked => "not parked",
            CommandError::NoParkPositionSet => "no park position set",
            CommandError::NotSupported => "not supported",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Pin => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
