//! Simulated board, clock and poll/tick bench shared by the test binaries.
#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use mount_motion::axis::{DriverStatus, Sense, StepDriver, StepTimer};
use mount_motion::{AxisBuilder, AxisHardware, Mount, SiderealClock, SystemConfig};

#[derive(Clone, Default)]
pub struct Pin {
    high: Rc<Cell<bool>>,
}

impl Pin {
    pub fn is_high(&self) -> bool {
        self.high.get()
    }
}

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high.set(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct Timer {
    period: Rc<Cell<u32>>,
}

impl Timer {
    pub fn period(&self) -> u32 {
        self.period.get()
    }
}

impl StepTimer for Timer {
    fn set_period_sub_micros(&mut self, period: u32) {
        self.period.set(period);
    }

    fn suspend(&mut self) {}

    fn resume(&mut self) {}
}

#[derive(Clone, Default)]
pub struct Driver {
    powered: Rc<Cell<bool>>,
    fault: Rc<Cell<bool>>,
}

impl Driver {
    pub fn is_powered(&self) -> bool {
        self.powered.get()
    }

    pub fn set_fault(&self, fault: bool) {
        self.fault.set(fault);
    }
}

impl StepDriver for Driver {
    fn power(&mut self, on: bool) {
        self.powered.set(on);
    }

    fn set_tracking_mode(&mut self) {}

    fn set_slew_mode(&mut self) -> u16 {
        1
    }

    fn status(&mut self) -> DriverStatus {
        DriverStatus { fault: self.fault.get(), ..Default::default() }
    }
}

#[derive(Clone, Default)]
pub struct Switch {
    active: Rc<Cell<bool>>,
}

impl Switch {
    pub fn set(&self, active: bool) {
        self.active.set(active);
    }
}

impl Sense for Switch {
    fn is_active(&mut self) -> bool {
        self.active.get()
    }
}

pub struct Board;

impl AxisHardware for Board {
    type Step = Pin;
    type Dir = Pin;
    type Timer = Timer;
    type Driver = Driver;
    type Input = Switch;
}

/// Sidereal clock the test moves by hand.
#[derive(Clone, Default)]
pub struct Clock {
    gmst: Rc<Cell<f64>>,
}

impl Clock {
    pub fn set(&self, gmst: f64) {
        self.gmst.set(gmst);
    }
}

impl SiderealClock for Clock {
    fn greenwich_sidereal_time(&self) -> f64 {
        self.gmst.get()
    }
}

/// Handles to one axis' simulated parts.
#[derive(Clone, Default)]
pub struct Rig {
    pub step: Pin,
    pub dir: Pin,
    pub timer: Timer,
    pub driver: Driver,
    pub home: Switch,
    carry: Rc<Cell<u64>>,
}

impl Rig {
    pub fn builder(&self) -> AxisBuilder<Board> {
        AxisBuilder::new()
            .step_pin(self.step.clone())
            .dir_pin(self.dir.clone())
            .timer(self.timer.clone())
            .driver(self.driver.clone())
    }

    /// Ticks the programmed period fits into one poll interval.
    fn ticks(&self, interval: u64) -> u64 {
        let period = u64::from(self.timer.period());
        if period == 0 {
            self.carry.set(0);
            return 0;
        }
        let carry = self.carry.get() + interval;
        self.carry.set(carry % period);
        carry / period
    }
}

/// A mount on simulated hardware, polled and ticked in lock step.
pub struct Bench {
    pub mount: Mount<Board, Clock>,
    pub clock: Clock,
    pub rig1: Rig,
    pub rig2: Rig,
    interval: u64,
}

impl Bench {
    pub fn new(config: &SystemConfig) -> Self {
        Self::build(config, false)
    }

    /// Bench whose axes have home switches wired to `rig.home`.
    pub fn with_home_senses(config: &SystemConfig) -> Self {
        Self::build(config, true)
    }

    fn build(config: &SystemConfig, home: bool) -> Self {
        let (rig1, rig2) = (Rig::default(), Rig::default());
        let axis = |rig: &Rig, name: &str| {
            let mut builder = rig.builder().from_config(config, name).unwrap();
            if home {
                builder = builder.home_sense(rig.home.clone());
            }
            builder.build().unwrap()
        };
        let (axis1, axis2) = (axis(&rig1, "axis1"), axis(&rig2, "axis2"));
        let clock = Clock::default();
        let mount = Mount::new(config, axis1, axis2, clock.clone());
        Self {
            mount,
            clock,
            rig1,
            rig2,
            interval: 16_000_000 / u64::from(config.mount.poll_hz),
        }
    }

    /// One poll followed by the ticks that fall within it.
    pub fn step(&mut self) {
        self.mount.poll();
        for _ in 0..self.rig1.ticks(self.interval) {
            self.mount.axis1_mut().on_tick().unwrap();
        }
        for _ in 0..self.rig2.ticks(self.interval) {
            self.mount.axis2_mut().on_tick().unwrap();
        }
    }

    pub fn run(&mut self, polls: usize) {
        for _ in 0..polls {
            self.step();
        }
    }

    /// Poll until `done` holds, returning the polls used, or `None` after `max`.
    pub fn run_until(&mut self, max: usize, mut done: impl FnMut(&Mount<Board, Clock>) -> bool) -> Option<usize> {
        for n in 0..max {
            if done(&self.mount) {
                return Some(n);
            }
            self.step();
        }
        None
    }
}

/// German equatorial mount at 40 N: 10 steps per degree, 10 deg/s slews.
pub const GEM_CONFIG: &str = r#"
[mount]
type = "gem"
poll_hz = 100

[site]
latitude_deg = 40.0
longitude_deg = 0.0
refraction = false

[limits]
horizon_deg = -10.0
overhead_deg = 90.0
past_meridian_east_deg = 15.0
past_meridian_west_deg = 15.0

[park]
hour_angle_deg = -45.0
declination_deg = 10.0
pier_side = "east"

[axes.axis1]
name = "RA"
steps_per_degree = 10.0
slew_rate_deg_per_sec = 10.0
acceleration_deg_per_sec2 = 10.0
limits = { min_degrees = -200.0, max_degrees = 20.0 }

[axes.axis2]
name = "Dec"
steps_per_degree = 10.0
slew_rate_deg_per_sec = 10.0
acceleration_deg_per_sec2 = 10.0
limits = { min_degrees = -100.0, max_degrees = 280.0 }
"#;

pub fn gem_config() -> SystemConfig {
    mount_motion::parse_config(GEM_CONFIG).unwrap()
}

pub fn gem_bench() -> Bench {
    let mut bench = Bench::new(&gem_config());
    bench.mount.enable(true);
    bench
}

pub fn deg(v: f64) -> f64 {
    v.to_radians()
}
