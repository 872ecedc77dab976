//! Builder pattern for Axis.

use heapless::String;

use crate::config::{AxisConfig, AxisSenses, AxisSettings, SystemConfig};
use crate::error::{ConfigError, Error, Result};

use super::controller::Axis;
use super::hardware::AxisHardware;

/// Builder for creating [`Axis`] instances.
pub struct AxisBuilder<H: AxisHardware> {
    step_pin: Option<H::Step>,
    dir_pin: Option<H::Dir>,
    timer: Option<H::Timer>,
    driver: Option<H::Driver>,
    home_sense: Option<H::Input>,
    min_limit: Option<H::Input>,
    max_limit: Option<H::Input>,
    name: Option<String<32>>,
    settings: Option<AxisSettings>,
    senses: Option<AxisSenses>,
}

impl<H: AxisHardware> Default for AxisBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: AxisHardware> AxisBuilder<H> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            timer: None,
            driver: None,
            home_sense: None,
            min_limit: None,
            max_limit: None,
            name: None,
            settings: None,
            senses: None,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: H::Step) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: H::Dir) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the tick timer.
    pub fn timer(mut self, timer: H::Timer) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the stepper driver.
    pub fn driver(mut self, driver: H::Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Set the home sense.
    pub fn home_sense(mut self, sense: H::Input) -> Self {
        self.home_sense = Some(sense);
        self
    }

    /// Set the minimum limit sense. With shared limits this is the one input.
    pub fn min_limit(mut self, sense: H::Input) -> Self {
        self.min_limit = Some(sense);
        self
    }

    /// Set the maximum limit sense.
    pub fn max_limit(mut self, sense: H::Input) -> Self {
        self.max_limit = Some(sense);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = String::try_from(name).ok();
        self
    }

    /// Set derived settings directly.
    pub fn settings(mut self, settings: AxisSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig, poll_hz: u16) -> Self {
        self.name = Some(config.name.clone());
        self.settings = Some(AxisSettings::from_config(config, poll_hz));
        self.senses = Some(config.senses);
        self
    }

    /// Configure from SystemConfig by axis name.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config, config.mount.poll_hz))
    }

    /// Build the Axis.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part is missing, or if the
    /// configuration wires a sense that was not supplied.
    pub fn build(self) -> Result<Axis<H>> {
        let step_pin = self.step_pin.ok_or_else(|| required("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or_else(|| required("dir_pin"))?;
        let timer = self.timer.ok_or_else(|| required("timer"))?;
        let driver = self.driver.ok_or_else(|| required("driver"))?;
        let settings = self.settings.ok_or_else(|| required("settings"))?;
        let name = self
            .name
            .unwrap_or_else(|| String::try_from("axis").unwrap_or_default());

        let (home_sense, min_limit, max_limit, shared_limit) = match self.senses {
            None => (self.home_sense, self.min_limit, self.max_limit, false),
            Some(senses) => {
                let home = if senses.home.pin.is_enabled() {
                    Some(self.home_sense.ok_or_else(|| required("home sense"))?)
                } else {
                    None
                };
                if senses.limits_shared() {
                    let limit = self
                        .min_limit
                        .or(self.max_limit)
                        .ok_or_else(|| required("limit sense"))?;
                    (home, Some(limit), None, true)
                } else {
                    let min = if senses.min.pin.is_enabled() {
                        Some(self.min_limit.ok_or_else(|| required("min limit sense"))?)
                    } else {
                        None
                    };
                    let max = if senses.max.pin.is_enabled() {
                        Some(self.max_limit.ok_or_else(|| required("max limit sense"))?)
                    } else {
                        None
                    };
                    (home, min, max, false)
                }
            }
        };

        Ok(Axis::new(
            name,
            step_pin,
            dir_pin,
            timer,
            driver,
            home_sense,
            min_limit,
            max_limit,
            shared_limit,
            settings,
        ))
    }
}

fn required(what: &str) -> Error {
    let mut msg = String::<128>::new();
    let _ = msg.push_str(what);
    let _ = msg.push_str(" is required");
    Error::Config(ConfigError::ParseError(msg))
}
