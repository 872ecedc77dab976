//! Axis module for mount-motion.
//!
//! One [`Axis`] drives one stepper motor: a step-pulse tick running from a
//! hardware timer and a slower poll that ramps the commanded frequency.
//! Boards describe their parts through [`AxisHardware`].

mod builder;
mod controller;
mod hardware;
#[cfg(test)]
pub(crate) mod sim;
mod steps;

pub use builder::AxisBuilder;
pub use controller::Axis;
pub use hardware::{AxisHardware, DriverStatus, Sense, SenseInput, StepDriver, StepTimer};
pub use steps::{CriticalSection, MicrostepMode, StepState};
