//! Unit tests for TOML configuration parsing.

use mount_motion::config::{
    ActiveLevel, CompensationMode, MeridianFlip, MountType, PierSideSelect, PinConfig, SystemConfig,
};
use mount_motion::config::units::Microsteps;
use mount_motion::{parse_config, PierSide};

/// Test parsing a complete mount configuration from TOML.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[mount]
type = "gem"
meridian_flip = "never"
preferred_pier_side = "east_only"
flip_skip_waypoint = true
poll_hz = 50
tracking_compensation = "refraction"
guide_rate = 0.75

[site]
latitude_deg = -33.9
longitude_deg = 18.4
pressure_mb = 980.0
temperature_c = 25.0

[limits]
horizon_deg = 5.0
overhead_deg = 85.0
past_meridian_east_deg = 10.0
past_meridian_west_deg = 20.0

[park]
hour_angle_deg = -90.0
declination_deg = -90.0
pier_side = "west"

[axes.axis1]
name = "RA"
steps_per_degree = 12800.0
reverse = true
backlash_arcsec = 30.0
slew_rate_deg_per_sec = 4.0
acceleration_deg_per_sec2 = 2.0
abort_deceleration_deg_per_sec2 = 8.0
tracking_microsteps = 64
slew_microsteps = 8
limits = { min_degrees = -200.0, max_degrees = 20.0 }

[axes.axis1.senses.home]
pin = { pull_up = 12 }
active = "low"

[axes.axis2]
name = "Dec"
steps_per_degree = 12800.0
slew_rate_deg_per_sec = 4.0
acceleration_deg_per_sec2 = 2.0
"#;

    let config: SystemConfig = parse_config(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.mount.mount_type, MountType::Gem);
    assert_eq!(config.mount.meridian_flip, MeridianFlip::Never);
    assert_eq!(config.mount.preferred_pier_side, PierSideSelect::EastOnly);
    assert!(config.mount.flip_skip_waypoint);
    assert_eq!(config.mount.poll_hz, 50);
    assert_eq!(config.mount.tracking_compensation, CompensationMode::Refraction);
    assert_eq!(config.mount.guide_rate, 0.75);

    assert_eq!(config.site.latitude.0, -33.9);
    assert_eq!(config.site.pressure, 980.0);
    assert_eq!(config.limits.past_meridian_west.0, 20.0);

    let park = config.park.expect("park missing");
    assert_eq!(park.pier_side, PierSide::West);

    let ra = config.axis("axis1").expect("axis1 not found");
    assert_eq!(ra.name.as_str(), "RA");
    assert!(ra.reverse);
    assert_eq!(ra.backlash.0, 30.0);
    assert_eq!(ra.tracking_microsteps, Some(Microsteps::SIXTY_FOURTH));
    assert_eq!(ra.microstep_ratio(), Some(8));
    assert_eq!(ra.limits.min.0, -200.0);
    assert_eq!(ra.senses.home.pin, PinConfig::PullUp(12));
    assert_eq!(ra.senses.home.active, ActiveLevel::Low);
}

/// Defaults fill everything but the axes.
#[test]
fn test_parse_defaults() {
    let config = parse_config(support_axes()).unwrap();

    assert_eq!(config.mount.mount_type, MountType::Gem);
    assert_eq!(config.mount.meridian_flip, MeridianFlip::Always);
    assert_eq!(config.mount.preferred_pier_side, PierSideSelect::Best);
    assert_eq!(config.mount.poll_hz, 100);
    assert_eq!(config.limits.horizon.0, -10.0);
    assert_eq!(config.limits.overhead.0, 90.0);
    assert!(config.site.refraction);
    assert!(config.park.is_none());

    let dec = config.axis("axis2").unwrap();
    assert_eq!(dec.limits.min.0, -180.0);
    assert!(dec.abort_deceleration.is_none());
    assert_eq!(config.axis_names().count(), 2);
}

#[test]
fn test_parse_alt_az() {
    let toml_str = format!("[mount]\ntype = \"alt_azm\"\n{}", support_axes());
    let config = parse_config(&toml_str).unwrap();
    assert_eq!(config.mount.mount_type, MountType::AltAzm);
}

#[test]
fn test_parse_rejects_bad_microsteps() {
    let toml_str = support_axes().replace(
        "[axes.axis2]",
        "tracking_microsteps = 3\n\n[axes.axis2]",
    );
    assert!(parse_config(&toml_str).is_err());
}

#[test]
fn test_parse_rejects_unknown_mount_type() {
    let toml_str = format!("[mount]\ntype = \"dobsonian\"\n{}", support_axes());
    assert!(parse_config(&toml_str).is_err());
}

fn support_axes() -> &'static str {
    r#"
[axes.axis1]
name = "RA"
steps_per_degree = 100.0
slew_rate_deg_per_sec = 2.0
acceleration_deg_per_sec2 = 1.0

[axes.axis2]
name = "Dec"
steps_per_degree = 100.0
slew_rate_deg_per_sec = 2.0
acceleration_deg_per_sec2 = 1.0
"#
}
