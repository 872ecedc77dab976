//! # mount-motion
//!
//! Telescope mount motion core with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Configuration-driven**: Describe site, limits and both axes in TOML
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR, `InputPin` for home and limit senses
//! - **no_std compatible**: Core library works without standard library
//! - **Interrupt-driven stepping**: A timer tick emits pulses, a fixed-rate poll ramps them
//! - **Goto and meridian flips**: Pier-side selection with flip waypoints for German equatorial mounts
//! - **Tracking**: Sidereal, lunar, solar and King rates with optional refraction compensation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mount_motion::{AxisBuilder, Mount};
//!
//! let config = mount_motion::load_config("mount.toml")?;
//!
//! let axis1 = AxisBuilder::new()
//!     .from_config(&config, "axis1")?
//!     .step_pin(step1)
//!     .dir_pin(dir1)
//!     .timer(timer1)
//!     .driver(driver1)
//!     .build()?;
//! let axis2 = /* same for "axis2" */;
//!
//! let mut mount = Mount::new(&config, axis1, axis2, clock);
//! mount.enable(true);
//! mount.goto_equ(&mount.equ_from_ra_dec(ra, dec))?;
//!
//! // poll at config.mount.poll_hz, tick each axis from its timer interrupt
//! mount.poll();
//! mount.axis1_mut().on_tick()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod motion;
pub mod mount;
pub mod transform;

// Re-exports for ergonomic API
pub use axis::{Axis, AxisBuilder, AxisHardware};
pub use config::{validate_config, AxisConfig, AxisSettings, MountConfig, SystemConfig};
pub use error::{CommandError, CommandResult, Error, Result};
pub use motion::Direction;
pub use mount::{Mount, Reply};
pub use transform::{Coordinate, PierSide, PointingModel, SiderealClock, Transform};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, DegreesPerSec, DegreesPerSecSquared, Microsteps, Steps};
