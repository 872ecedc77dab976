//! Unit tests for coordinate transforms.

use core::f64::consts::{FRAC_PI_2, PI};

use mount_motion::config::MountType;
use mount_motion::transform::{
    angle_difference, apparent_refraction, normalize_2pi, normalize_pm_pi, true_refraction,
    Atmosphere, Coordinate, PierSide, Site, Transform,
};

use crate::support::deg;

fn close(a: f64, b: f64) -> bool {
    angle_difference(a, b).abs() < 1e-9
}

#[test]
fn test_normalizers() {
    assert!(close(normalize_pm_pi(deg(270.0)), deg(-90.0)));
    assert!(close(normalize_2pi(deg(-90.0)), deg(270.0)));
    assert!(normalize_2pi(2.0 * PI) < 2.0 * PI);
    assert!(close(angle_difference(deg(10.0), deg(350.0)), deg(20.0)));
}

#[test]
fn test_meridian_transit_altitude() {
    // on the meridian, altitude is 90 - |latitude - declination|
    let site = Site::new(deg(40.0), 0.0);
    let mut c = Coordinate::equatorial(0.0, deg(20.0));
    site.equ_to_hor(&mut c);
    assert!(close(c.a, deg(70.0)));
    assert!(close(c.z, deg(180.0)));

    let mut c = Coordinate::equatorial(0.0, deg(60.0));
    site.equ_to_hor(&mut c);
    assert!(close(c.a, deg(70.0)));
    assert!(close(c.z, 0.0));
}

#[test]
fn test_horizon_round_trip() {
    let site = Site::new(deg(-33.0), deg(18.0));
    let mut c = Coordinate::equatorial(deg(-50.0), deg(-10.0));
    site.equ_to_hor(&mut c);
    let (h, d) = (c.h, c.d);
    c.h = 0.0;
    c.d = 0.0;
    site.hor_to_equ(&mut c);
    assert!(close(c.h, h));
    assert!(close(c.d, d));
}

#[test]
fn test_sidereal_time_and_hour_angle() {
    let site = Site::new(deg(40.0), deg(15.0));
    assert!(close(site.local_sidereal_time(0.0), deg(15.0)));
    // a star with RA equal to the local sidereal time transits
    assert!(close(site.hour_angle(deg(15.0), 0.0), 0.0));
    assert!(close(site.right_ascension(deg(30.0), 0.0), deg(345.0)));
}

#[test]
fn test_refraction_near_horizon() {
    let r = true_refraction(0.0, 1010.0, 10.0);
    // about half a degree at the horizon
    assert!(r > deg(0.45) && r < deg(0.6));
    assert!(true_refraction(FRAC_PI_2, 1010.0, 10.0).abs() < deg(0.001));

    let apparent = deg(10.0);
    let back = apparent - apparent_refraction(apparent, 1010.0, 10.0);
    let forward = back + true_refraction(back, 1010.0, 10.0);
    assert!((forward - apparent).abs() < deg(0.01));
}

#[test]
fn test_gem_west_instrument_angles() {
    let transform = Transform::new(Site::new(deg(40.0), 0.0), MountType::Gem, None);
    let mut c = Coordinate::equatorial(deg(100.0), deg(40.0)).on_side(PierSide::West);
    transform.equ_to_hor(&mut c);

    let (a1, a2) = transform.mount_to_instrument(&c);
    assert!(close(a1, deg(-80.0)));
    assert!(close(a2, deg(140.0)));

    let back = transform.instrument_to_mount(a1, a2);
    assert_eq!(back.pier_side, PierSide::West);
    assert!(close(back.h, deg(100.0)));
    assert!(close(back.d, deg(40.0)));
}

#[test]
fn test_fork_has_no_folding() {
    let transform = Transform::new(Site::new(deg(40.0), 0.0), MountType::Fork, None);
    let c = Coordinate::equatorial(deg(100.0), deg(40.0)).on_side(PierSide::West);
    let (a1, a2) = transform.mount_to_instrument(&c);
    assert!(close(a1, deg(100.0)));
    assert!(close(a2, deg(40.0)));
    assert_eq!(transform.instrument_to_mount(a1, a2).pier_side, PierSide::East);
}

#[test]
fn test_alt_az_fills_equatorial() {
    let transform = Transform::new(Site::new(deg(40.0), 0.0), MountType::AltAzm, None);
    let c = transform.instrument_to_mount(deg(180.0), deg(70.0));
    assert_eq!(c.pier_side, PierSide::None);
    // due south at 70 degrees is on the meridian at declination 20
    assert!(close(c.h, 0.0));
    assert!(close(c.d, deg(20.0)));

    let (a1, a2) = transform.mount_to_instrument(&c);
    assert!(close(a1, deg(180.0)));
    assert!(close(a2, deg(70.0)));
}

#[test]
fn test_refraction_in_mount_frame() {
    let atmosphere = Atmosphere { pressure: 1010.0, temperature: 10.0 };
    let transform = Transform::new(Site::new(deg(40.0), 0.0), MountType::Gem, Some(atmosphere));
    let native = Coordinate::equatorial(deg(80.0), deg(0.0));
    let mount = transform.native_to_mount(&native);
    let mut plain = native;
    transform.equ_to_hor(&mut plain);
    assert!(mount.a > plain.a);

    let back = transform.mount_to_native(&mount);
    assert!(angle_difference(back.h, native.h).abs() < deg(0.01));
    assert!(angle_difference(back.d, native.d).abs() < deg(0.01));
}
