//! Unit tests for the axis controller.

use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
use mount_motion::axis::{Axis, AxisHardware};
use mount_motion::motion::{Direction, HomingStage, RampMode};
use mount_motion::{AxisSettings, CommandError};

use crate::support::{deg, gem_config, Board, Driver, Rig, Switch, Timer};

struct MockBoard;

impl AxisHardware for MockBoard {
    type Step = PinMock;
    type Dir = PinMock;
    type Timer = Timer;
    type Driver = Driver;
    type Input = Switch;
}

fn settings() -> AxisSettings {
    let config = gem_config();
    AxisSettings::from_config(config.axis("axis1").unwrap(), config.mount.poll_hz)
}

/// Poll and tick one axis for `polls` poll intervals at 100 Hz.
fn run(axis: &mut Axis<Board>, rig: &Rig, polls: usize) {
    let interval = 160_000u64;
    let mut carry = 0u64;
    for _ in 0..polls {
        axis.poll();
        let period = u64::from(rig.timer.period());
        if period == 0 {
            carry = 0;
            continue;
        }
        carry += interval;
        while carry >= period {
            axis.on_tick().unwrap();
            carry -= period;
        }
    }
}

fn enabled_axis() -> (Axis<Board>, Rig) {
    let rig = Rig::default();
    let mut axis = rig.builder().settings(settings()).build().unwrap();
    axis.enable(true);
    (axis, rig)
}

// =============================================================================
// Tick
// =============================================================================

/// Direction is written one tick ahead of the pulse, and a pulse is two ticks.
#[test]
fn test_tick_pin_sequence() {
    let step_expectations = [
        Transaction::set(State::High),
        Transaction::set(State::Low),
        Transaction::set(State::High),
        Transaction::set(State::Low),
    ];
    let dir_expectations = [Transaction::set(State::High), Transaction::set(State::Low)];
    let mut step = PinMock::new(&step_expectations);
    let mut dir = PinMock::new(&dir_expectations);

    let mut axis = mount_motion::AxisBuilder::<MockBoard>::new()
        .step_pin(step.clone())
        .dir_pin(dir.clone())
        .timer(Timer::default())
        .driver(Driver::default())
        .settings(settings())
        .build()
        .unwrap();
    axis.enable(true);
    axis.reset_position_steps(0).unwrap();

    let one_step = 1.0 / axis.settings().steps_per_measure;
    axis.set_target_coordinate(one_step);
    for _ in 0..4 {
        axis.on_tick().unwrap();
    }
    assert_eq!(axis.motor_steps(), 1);

    axis.set_target_coordinate(0.0);
    for _ in 0..4 {
        axis.on_tick().unwrap();
    }
    assert_eq!(axis.motor_steps(), 0);

    step.done();
    dir.done();
}

#[test]
fn test_tick_idle_when_disabled() {
    let rig = Rig::default();
    let mut axis = rig.builder().settings(settings()).build().unwrap();
    axis.set_target_coordinate(deg(1.0));
    for _ in 0..10 {
        axis.on_tick().unwrap();
    }
    assert_eq!(axis.motor_steps(), 0);
    assert!(!rig.step.is_high());
}

// =============================================================================
// Goto ramp
// =============================================================================

#[test]
fn test_goto_by_distance_reaches_target() {
    let (mut axis, rig) = enabled_axis();
    axis.set_target_coordinate(deg(-20.0));
    let target = axis.target_steps();
    axis.auto_slew_rate_by_distance(axis.settings().accel_distance()).unwrap();
    assert_eq!(axis.ramp_mode(), RampMode::RampByDistance);

    run(&mut axis, &rig, 1_000);
    assert_eq!(axis.ramp_mode(), RampMode::Idle);
    assert_eq!(axis.motor_steps(), target);
    assert!(axis.near_target());
    assert_eq!(rig.timer.period(), 0);
}

#[test]
fn test_goto_outside_limits_rejected() {
    let (mut axis, _rig) = enabled_axis();
    axis.set_target_coordinate(deg(30.0));
    assert_eq!(
        axis.auto_slew_rate_by_distance(axis.settings().accel_distance()),
        Err(CommandError::OutsideLimits)
    );
    assert_eq!(
        axis.auto_slew_rate_by_distance(0.0),
        Err(CommandError::ParamRange)
    );
}

#[test]
fn test_goto_rejected_in_standby_and_fault() {
    let rig = Rig::default();
    let mut axis = rig.builder().settings(settings()).build().unwrap();
    axis.set_target_coordinate(deg(-10.0));
    assert_eq!(
        axis.auto_slew_rate_by_distance(deg(5.0)),
        Err(CommandError::SlewInStandby)
    );

    axis.enable(true);
    rig.driver.set_fault(true);
    assert_eq!(
        axis.auto_slew_rate_by_distance(deg(5.0)),
        Err(CommandError::HardwareFault)
    );
}

// =============================================================================
// Manual slews
// =============================================================================

#[test]
fn test_slew_ramps_to_rate_and_stops() {
    let (mut axis, rig) = enabled_axis();
    axis.auto_slew(Direction::Reverse).unwrap();
    run(&mut axis, &rig, 150);
    let slew = axis.settings().slew_freq;
    assert!((axis.frequency() + slew).abs() < 1e-9);

    axis.auto_slew_stop();
    assert_eq!(axis.ramp_mode(), RampMode::DecelerateToStop);
    run(&mut axis, &rig, 120);
    assert_eq!(axis.ramp_mode(), RampMode::Idle);
    assert_eq!(axis.frequency(), 0.0);
    assert!(axis.motor_steps() < 0);
}

#[test]
fn test_limit_sense_blocks_direction() {
    let rig = Rig::default();
    let max = Switch::default();
    let mut axis = rig
        .builder()
        .settings(settings())
        .max_limit(max.clone())
        .build()
        .unwrap();
    axis.enable(true);

    max.set(true);
    assert_eq!(axis.auto_slew(Direction::Forward), Err(CommandError::OutsideLimits));
    assert!(axis.auto_slew(Direction::Reverse).is_ok());
}

#[test]
fn test_limit_sense_aborts_slew() {
    let rig = Rig::default();
    let min = Switch::default();
    let mut axis = rig
        .builder()
        .settings(settings())
        .min_limit(min.clone())
        .build()
        .unwrap();
    axis.enable(true);
    axis.auto_slew(Direction::Reverse).unwrap();
    run(&mut axis, &rig, 20);

    min.set(true);
    run(&mut axis, &rig, 1);
    assert_eq!(axis.ramp_mode(), RampMode::DecelerateAbort);
}

#[test]
fn test_tracking_follows_base_rate() {
    let (mut axis, rig) = enabled_axis();
    // one degree per second is ten steps per second
    axis.set_frequency_base(deg(1.0));
    axis.set_tracking(true);
    run(&mut axis, &rig, 100);
    assert!((axis.motor_steps() - 10).abs() <= 1);

    axis.set_tracking(false);
    let at = axis.motor_steps();
    run(&mut axis, &rig, 100);
    assert!((axis.motor_steps() - at).abs() <= 1);
}

// =============================================================================
// Homing
// =============================================================================

#[test]
fn test_homing_converges_on_sense_edge() {
    let rig = Rig::default();
    let mut axis = rig
        .builder()
        .settings(settings())
        .home_sense(rig.home.clone())
        .build()
        .unwrap();
    axis.enable(true);
    axis.auto_slew_home().unwrap();
    assert_eq!(axis.homing_stage(), HomingStage::Fast);

    // the switch closes at step 50
    let mut polls = 0;
    while axis.is_homing() && polls < 10_000 {
        rig.home.set(axis.motor_steps() >= 50);
        run(&mut axis, &rig, 1);
        polls += 1;
    }
    assert!(!axis.is_homing());
    assert!((axis.motor_steps() - 50).abs() <= 5);
}

#[test]
fn test_homing_needs_sense() {
    let (mut axis, _rig) = enabled_axis();
    assert_eq!(axis.auto_slew_home(), Err(CommandError::NotSupported));
}
