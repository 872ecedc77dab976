//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, MountLimits, SiteConfig, SystemConfig};

/// Names of the two axes a mount is built from.
pub const AXIS_NAMES: [&str; 2] = ["axis1", "axis2"];

/// Validate a system configuration.
///
/// Checks:
/// - Both mount axes are present and valid
/// - Site coordinates are on the globe
/// - Altitude and meridian limits are ordered and in range
/// - Poll rate is non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for name in AXIS_NAMES {
        if config.axis(name).is_none() {
            return Err(Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(name).unwrap_or_default(),
            )));
        }
    }

    for (_, axis) in config.axes.iter() {
        validate_axis(axis)?;
    }

    validate_site(&config.site)?;
    validate_limits(&config.limits)?;

    if config.mount.poll_hz == 0 {
        return Err(Error::Config(ConfigError::InvalidPollRate(config.mount.poll_hz)));
    }

    Ok(())
}

fn validate_axis(config: &AxisConfig) -> Result<()> {
    if config.steps_per_degree <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerDegree(
            config.steps_per_degree,
        )));
    }

    if config.slew_rate.value() <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidSlewRate(config.slew_rate.value())));
    }

    // Backlash takeup must not be faster than a slew
    if let Some(rate) = config.backlash_rate {
        if rate.value() <= 0.0 || rate.value() > config.slew_rate.value() {
            return Err(Error::Config(ConfigError::InvalidSlewRate(rate.value())));
        }
    }

    if config.acceleration.value() <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration(
            config.acceleration.value(),
        )));
    }

    if let Some(abort) = config.abort_deceleration {
        if abort.value() <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidAcceleration(abort.value())));
        }
    }

    if !config.limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSoftLimits {
            min: config.limits.min.0,
            max: config.limits.max.0,
        }));
    }

    if let (Some(tracking), Some(slew)) = (config.tracking_microsteps, config.slew_microsteps) {
        if tracking.ratio_to(slew).is_none() {
            return Err(Error::Config(ConfigError::InvalidMicrostepRatio {
                tracking: tracking.value(),
                slew: slew.value(),
            }));
        }
    }

    Ok(())
}

fn validate_site(site: &SiteConfig) -> Result<()> {
    if !(-90.0..=90.0).contains(&site.latitude.0) {
        return Err(Error::Config(ConfigError::InvalidLatitude(site.latitude.0)));
    }

    if !(-180.0..=180.0).contains(&site.longitude.0) {
        return Err(Error::Config(ConfigError::InvalidLongitude(site.longitude.0)));
    }

    Ok(())
}

fn validate_limits(limits: &MountLimits) -> Result<()> {
    let (min, max) = (limits.horizon.value(), limits.overhead.value());
    if min >= max || min < -90.0 || max > 90.0 {
        return Err(Error::Config(ConfigError::InvalidAltitudeLimits { min, max }));
    }

    for past in [limits.past_meridian_east.value(), limits.past_meridian_west.value()] {
        if !(-180.0..=180.0).contains(&past) {
            return Err(Error::Config(ConfigError::InvalidMeridianLimit(past)));
        }
    }

    Ok(())
}
