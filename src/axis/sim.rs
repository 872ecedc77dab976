//! Simulated axis hardware for unit tests.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};

use super::builder::AxisBuilder;
use super::controller::Axis;
use super::hardware::{AxisHardware, DriverStatus, Sense, StepDriver, StepTimer};
use crate::config::{
    AxisConfig, AxisSenses, AxisSettings, DegreesPerSec, DegreesPerSecSquared, SoftLimits,
};

#[derive(Clone, Default)]
pub struct SimPin {
    high: Rc<Cell<bool>>,
    rising: Rc<Cell<u32>>,
}

impl SimPin {
    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    pub fn rising_edges(&self) -> u32 {
        self.rising.get()
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high.get() {
            self.rising.set(self.rising.get() + 1);
        }
        self.high.set(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct SimTimer {
    period: Rc<Cell<u32>>,
    depth: Rc<Cell<u32>>,
    suspends: Rc<Cell<u32>>,
    carry: Rc<Cell<u64>>,
}

impl SimTimer {
    pub fn period(&self) -> u32 {
        self.period.get()
    }

    pub fn suspends(&self) -> u32 {
        self.suspends.get()
    }

    pub fn is_suspended(&self) -> bool {
        self.depth.get() > 0
    }
}

impl StepTimer for SimTimer {
    fn set_period_sub_micros(&mut self, period: u32) {
        self.period.set(period);
    }

    fn suspend(&mut self) {
        self.depth.set(self.depth.get() + 1);
        self.suspends.set(self.suspends.get() + 1);
    }

    fn resume(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[derive(Clone)]
pub struct SimDriver {
    status: Rc<Cell<DriverStatus>>,
    powered: Rc<Cell<bool>>,
    slewing: Rc<Cell<bool>>,
    ratio: u16,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::with_ratio(1)
    }
}

impl SimDriver {
    pub fn with_ratio(ratio: u16) -> Self {
        Self {
            status: Rc::default(),
            powered: Rc::default(),
            slewing: Rc::default(),
            ratio,
        }
    }

    pub fn set_fault(&self, fault: bool) {
        self.status.set(DriverStatus { fault, ..Default::default() });
    }

    pub fn is_powered(&self) -> bool {
        self.powered.get()
    }

    pub fn is_slew_mode(&self) -> bool {
        self.slewing.get()
    }
}

impl StepDriver for SimDriver {
    fn power(&mut self, on: bool) {
        self.powered.set(on);
    }

    fn set_tracking_mode(&mut self) {
        self.slewing.set(false);
    }

    fn set_slew_mode(&mut self) -> u16 {
        self.slewing.set(true);
        self.ratio
    }

    fn status(&mut self) -> DriverStatus {
        self.status.get()
    }
}

#[derive(Clone, Default)]
pub struct SimSense {
    active: Rc<Cell<bool>>,
}

impl SimSense {
    pub fn set(&self, active: bool) {
        self.active.set(active);
    }
}

impl Sense for SimSense {
    fn is_active(&mut self) -> bool {
        self.active.get()
    }
}

pub struct Sim;

impl AxisHardware for Sim {
    type Step = SimPin;
    type Dir = SimPin;
    type Timer = SimTimer;
    type Driver = SimDriver;
    type Input = SimSense;
}

#[derive(Clone, Default)]
pub struct SimHandles {
    pub step: SimPin,
    pub dir: SimPin,
    pub timer: SimTimer,
    pub driver: SimDriver,
    pub home: SimSense,
    pub min: SimSense,
    pub max: SimSense,
}

/// 10 steps per degree, 2 deg/s slew, 2 deg/s^2, 100 Hz poll.
pub fn test_config() -> AxisConfig {
    AxisConfig {
        name: heapless::String::try_from("test").unwrap(),
        steps_per_degree: 10.0,
        reverse: false,
        limits: SoftLimits::default(),
        backlash: Default::default(),
        backlash_rate: None,
        slew_rate: DegreesPerSec(2.0),
        acceleration: DegreesPerSecSquared(2.0),
        abort_deceleration: None,
        min_rate: None,
        tracking_microsteps: None,
        slew_microsteps: None,
        senses: AxisSenses::default(),
    }
}

pub fn test_settings() -> AxisSettings {
    AxisSettings::from_config(&test_config(), 100)
}

pub fn test_axis(settings: AxisSettings) -> (Axis<Sim>, SimHandles) {
    test_axis_with(settings, SimHandles::default(), false)
}

pub fn test_axis_with(
    settings: AxisSettings,
    handles: SimHandles,
    with_senses: bool,
) -> (Axis<Sim>, SimHandles) {
    let mut builder = AxisBuilder::<Sim>::new()
        .step_pin(handles.step.clone())
        .dir_pin(handles.dir.clone())
        .timer(handles.timer.clone())
        .driver(handles.driver.clone())
        .settings(settings);
    if with_senses {
        builder = builder
            .home_sense(handles.home.clone())
            .min_limit(handles.min.clone())
            .max_limit(handles.max.clone());
    }
    (builder.build().unwrap(), handles)
}

/// Poll `polls` times, running the ticks the programmed period fits into each poll.
pub fn run_polls(axis: &mut Axis<Sim>, handles: &SimHandles, polls: usize) {
    let interval = (16_000_000.0 / axis.settings().poll_hz) as u64;
    for _ in 0..polls {
        axis.poll();
        let period = u64::from(handles.timer.period());
        if period == 0 {
            handles.timer.carry.set(0);
            continue;
        }
        let mut carry = handles.timer.carry.get() + interval;
        while carry >= period {
            axis.on_tick().unwrap();
            carry -= period;
        }
        handles.timer.carry.set(carry);
    }
}
