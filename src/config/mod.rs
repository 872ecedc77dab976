//! Configuration module for mount-motion.
//!
//! Provides types for loading and validating mount, site, limit and per-axis
//! configuration from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod mount;
mod pins;
mod settings;
mod site;
mod system;
pub mod units;
mod validation;

pub use axis::AxisConfig;
pub use limits::{MeasureLimits, MountLimits, SoftLimits};
pub use mount::{CompensationMode, MeridianFlip, MountConfig, MountType, ParkConfig, PierSideSelect};
pub use pins::{ActiveLevel, AxisSenses, PinConfig, SenseConfig};
pub use settings::AxisSettings;
pub use site::SiteConfig;
pub use system::SystemConfig;
pub use validation::{validate_config, AXIS_NAMES};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Arcseconds, Degrees, DegreesPerSec, DegreesPerSecSquared, Microsteps, Steps};
