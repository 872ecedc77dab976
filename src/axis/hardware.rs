//! Hardware seams of an axis.
//!
//! Step and direction outputs are plain embedded-hal pins. The tick timer,
//! the stepper driver and the sense inputs are small traits so that boards
//! supply their own implementations at construction time.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{ActiveLevel, SenseConfig};

/// Periodic timer that calls [`Axis::on_tick`](super::Axis::on_tick).
pub trait StepTimer {
    /// Reprogram the tick period, in sixteenths of a microsecond. Zero stops the timer.
    fn set_period_sub_micros(&mut self, period: u32);

    /// Hold off the tick until [`resume`](Self::resume).
    fn suspend(&mut self);

    /// Allow the tick again.
    fn resume(&mut self);
}

/// Stepper driver status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverStatus {
    /// Generic driver fault.
    pub fault: bool,
    /// Over-temperature shutdown or warning.
    pub over_temperature: bool,
    /// Open load on a coil.
    pub open_load: bool,
    /// Coil shorted to ground.
    pub short_to_ground: bool,
    /// Motor at standstill.
    pub standstill: bool,
}

impl DriverStatus {
    /// Whether any condition that must stop motion is present.
    pub fn is_fault(&self) -> bool {
        self.fault || self.over_temperature || self.short_to_ground
    }
}

/// Driver-specific capabilities (power, microstep mode, status).
pub trait StepDriver {
    /// Energize or release the motor.
    fn power(&mut self, on: bool);

    /// Switch to the fine tracking microstep mode.
    fn set_tracking_mode(&mut self);

    /// Switch to the coarse slew microstep mode.
    ///
    /// Returns how many tracking microsteps one slew microstep covers.
    fn set_slew_mode(&mut self) -> u16;

    /// Read the driver status.
    fn status(&mut self) -> DriverStatus;
}

/// A binary sense input such as a home or limit switch.
pub trait Sense {
    /// Whether the sense is currently active.
    fn is_active(&mut self) -> bool;
}

/// Adapts an embedded-hal input pin to [`Sense`].
pub struct SenseInput<P: InputPin> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> SenseInput<P> {
    /// Wrap a pin that is active at `active`.
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Wrap a pin using the active level from configuration.
    pub fn from_config(pin: P, config: &SenseConfig) -> Self {
        Self::new(pin, config.active)
    }

    /// Release the pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Sense for SenseInput<P> {
    fn is_active(&mut self) -> bool {
        // read errors count as active
        match self.active {
            ActiveLevel::High => self.pin.is_high().unwrap_or(true),
            ActiveLevel::Low => self.pin.is_low().unwrap_or(true),
        }
    }
}

/// The concrete hardware types of one axis.
pub trait AxisHardware {
    /// STEP output.
    type Step: OutputPin;
    /// DIR output.
    type Dir: OutputPin;
    /// Tick timer.
    type Timer: StepTimer;
    /// Stepper driver.
    type Driver: StepDriver;
    /// Home and limit inputs.
    type Input: Sense;
}
