//! Axis controller.
//!
//! Generic over the board's [`AxisHardware`]. The tick ([`Axis::on_tick`])
//! emits step pulses towards the target; the poll ([`Axis::poll`]) runs the
//! ramp, homing and microstep state machines and reprograms the tick period.

use embedded_hal::digital::OutputPin;
use heapless::String;
use libm::fabs;

use super::hardware::{AxisHardware, Sense, StepDriver, StepTimer};
use super::steps::{CriticalSection, MicrostepMode, StepState};
use crate::config::AxisSettings;
use crate::error::{CommandError, CommandResult, MotorError};
use crate::motion::{
    approach, distance_frequency, next_stage_frequency, tick_period_sub_micros, Direction,
    HomingStage, RampMode,
};

/// Rises above this multiple of the backlash frequency request slew microsteps.
const SLEW_MODE_ENTER: f64 = 1.2;
/// Falls below this multiple of the backlash frequency return to tracking microsteps.
const SLEW_MODE_EXIT: f64 = 1.1;

/// One motor axis.
pub struct Axis<H: AxisHardware> {
    name: String<32>,
    step_pin: H::Step,
    dir_pin: H::Dir,
    timer: H::Timer,
    driver: H::Driver,
    home_sense: Option<H::Input>,
    min_limit: Option<H::Input>,
    max_limit: Option<H::Input>,
    shared_limit: bool,
    settings: AxisSettings,

    steps: StepState,
    index_steps: i64,
    origin_steps: i64,
    backlash_store: Option<(i64, i64)>,

    enabled: bool,
    tracking: bool,
    fault: bool,

    base_frequency: f64,
    frequency: f64,
    slew_frequency: f64,
    ramp_acceleration: f64,
    ramp_mode: RampMode,
    homing: HomingStage,
    home_sense_start: bool,
    period: u32,
}

impl<H: AxisHardware> Axis<H> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String<32>,
        step_pin: H::Step,
        dir_pin: H::Dir,
        timer: H::Timer,
        driver: H::Driver,
        home_sense: Option<H::Input>,
        min_limit: Option<H::Input>,
        max_limit: Option<H::Input>,
        shared_limit: bool,
        settings: AxisSettings,
    ) -> Self {
        Self {
            name,
            step_pin,
            dir_pin,
            timer,
            driver,
            home_sense,
            min_limit,
            max_limit,
            shared_limit,
            steps: StepState::new(settings.backlash_steps, settings.microstep_ratio),
            settings,
            index_steps: 0,
            origin_steps: 0,
            backlash_store: None,
            enabled: false,
            tracking: false,
            fault: false,
            base_frequency: 0.0,
            frequency: 0.0,
            slew_frequency: settings.slew_freq,
            ramp_acceleration: settings.acceleration,
            ramp_mode: RampMode::Idle,
            homing: HomingStage::None,
            home_sense_start: false,
            period: 0,
        }
    }

    fn critical(&mut self) -> CriticalSection<'_, H::Timer> {
        CriticalSection::new(&mut self.timer, &mut self.steps)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Session settings.
    #[inline]
    pub fn settings(&self) -> &AxisSettings {
        &self.settings
    }

    /// Step state as last left by the tick.
    #[inline]
    pub fn step_state(&self) -> &StepState {
        &self.steps
    }

    /// Motor position in steps.
    #[inline]
    pub fn motor_steps(&self) -> i64 {
        self.steps.motor_steps
    }

    /// Target position in steps.
    #[inline]
    pub fn target_steps(&self) -> i64 {
        self.steps.target_steps
    }

    /// Offset between motor steps and instrument steps.
    #[inline]
    pub fn index_steps(&self) -> i64 {
        self.index_steps
    }

    /// Slack currently taken up.
    #[inline]
    pub fn backlash_steps(&self) -> i64 {
        self.steps.backlash_steps
    }

    /// Current ramp state.
    #[inline]
    pub fn ramp_mode(&self) -> RampMode {
        self.ramp_mode
    }

    /// Current homing stage.
    #[inline]
    pub fn homing_stage(&self) -> HomingStage {
        self.homing
    }

    /// Current microstep mode.
    #[inline]
    pub fn microstep_mode(&self) -> MicrostepMode {
        self.steps.microstep_mode
    }

    /// Base (tracking) frequency in measures per second.
    #[inline]
    pub fn base_frequency(&self) -> f64 {
        self.base_frequency
    }

    /// Ramp frequency in measures per second.
    #[inline]
    pub fn ramp_frequency(&self) -> f64 {
        self.frequency
    }

    /// Tick period last programmed, in sixteenths of a microsecond.
    #[inline]
    pub fn tick_period(&self) -> u32 {
        self.period
    }

    /// Whether the driver is powered.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the target follows the base rate.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Whether the driver reported a fault at the last poll.
    #[inline]
    pub fn fault(&self) -> bool {
        self.fault
    }

    /// Whether a ramp is in progress.
    #[inline]
    pub fn is_slewing(&self) -> bool {
        self.ramp_mode.is_active()
    }

    /// Whether sensor homing is in progress.
    #[inline]
    pub fn is_homing(&self) -> bool {
        self.homing.is_active()
    }

    /// Whether a home sense is fitted.
    #[inline]
    pub fn has_home_sense(&self) -> bool {
        self.home_sense.is_some()
    }

    /// Commanded frequency: base plus ramp, in measures per second.
    pub fn frequency(&self) -> f64 {
        if self.ramp_mode == RampMode::RampByDistance {
            self.frequency
        } else if self.tracking {
            self.base_frequency + self.frequency
        } else {
            self.frequency
        }
    }

    // ------------------------------------------------------------------
    // Position and target
    // ------------------------------------------------------------------

    /// Set motor and target to `steps`, clearing index and backlash.
    pub fn reset_position_steps(&mut self, steps: i64) -> CommandResult {
        if self.ramp_mode.is_active() {
            return Err(CommandError::SlewInMotion);
        }
        {
            let mut cs = self.critical();
            cs.motor_steps = steps;
            cs.target_steps = steps;
            cs.backlash_steps = 0;
        }
        if let Some((_, amount)) = self.backlash_store {
            self.backlash_store = Some((0, amount));
        }
        self.index_steps = 0;
        self.origin_steps = steps;
        Ok(())
    }

    /// Redefine the current instrument coordinate without moving.
    pub fn set_instrument_coordinate(&mut self, measure: f64) {
        self.index_steps = self.settings.measure_to_steps(measure) - self.steps.motor_steps;
    }

    /// Instrument coordinate in measures.
    pub fn instrument_coordinate(&self) -> f64 {
        self.settings
            .steps_to_measure(self.steps.motor_steps + self.index_steps)
    }

    /// Set the target in instrument measures. Does not start motion.
    pub fn set_target_coordinate(&mut self, measure: f64) {
        let target = self.settings.measure_to_steps(measure) - self.index_steps;
        self.critical().target_steps = target;
    }

    /// Target in instrument measures.
    pub fn target_coordinate(&self) -> f64 {
        self.settings
            .steps_to_measure(self.steps.target_steps + self.index_steps)
    }

    /// Set the target snapped to the nearest park step boundary.
    pub fn set_target_coordinate_park(&mut self, measure: f64) {
        let target = self.settings.measure_to_steps(measure) - self.index_steps;
        let target = snap(target, self.settings.park_modulus);
        self.critical().target_steps = target;
    }

    /// Restore the instrument coordinate of a parked axis.
    ///
    /// The motor count is moved to the nearest park step boundary, where the
    /// driver's microstep phase rests after power up.
    pub fn set_instrument_coordinate_park(&mut self, measure: f64) -> CommandResult {
        if self.ramp_mode.is_active() {
            return Err(CommandError::SlewInMotion);
        }
        let modulus = self.settings.park_modulus;
        let motor = {
            let mut cs = self.critical();
            cs.motor_steps = snap(cs.motor_steps, modulus);
            cs.target_steps = cs.motor_steps;
            cs.backlash_steps = 0;
            cs.motor_steps
        };
        self.index_steps = self.settings.measure_to_steps(measure) - motor;
        Ok(())
    }

    /// Remember the current position as the ramp origin.
    pub fn mark_origin_coordinate(&mut self) {
        self.origin_steps = self.steps.motor_steps;
    }

    /// Distance to the target in measures.
    pub fn target_distance(&self) -> f64 {
        self.settings
            .steps_to_measure((self.steps.target_steps - self.steps.motor_steps).abs())
    }

    /// Smaller of the distances from the origin and to the target, in measures.
    pub fn origin_or_target_distance(&self) -> f64 {
        let from_origin = (self.steps.motor_steps - self.origin_steps).abs();
        let to_target = (self.steps.target_steps - self.steps.motor_steps).abs();
        self.settings.steps_to_measure(from_origin.min(to_target))
    }

    /// Whether the motor is within two pulses of the target.
    pub fn near_target(&self) -> bool {
        (self.steps.target_steps - self.steps.motor_steps).abs() <= 2 * self.steps.step_size
    }

    // ------------------------------------------------------------------
    // Backlash
    // ------------------------------------------------------------------

    /// Fold taken-up slack into the motor count and stop compensating.
    pub fn disable_backlash(&mut self) {
        if self.backlash_store.is_some() {
            return;
        }
        let stored = {
            let mut cs = self.critical();
            let stored = (cs.backlash_steps, cs.backlash_amount_steps);
            let slack = cs.backlash_steps;
            cs.motor_steps += slack;
            cs.target_steps += slack;
            cs.backlash_steps = 0;
            cs.backlash_amount_steps = 0;
            stored
        };
        self.backlash_store = Some(stored);
    }

    /// Undo [`disable_backlash`](Self::disable_backlash).
    pub fn enable_backlash(&mut self) {
        if let Some((slack, amount)) = self.backlash_store.take() {
            let mut cs = self.critical();
            cs.motor_steps -= slack;
            cs.target_steps -= slack;
            cs.backlash_steps = slack;
            cs.backlash_amount_steps = amount;
        }
    }

    // ------------------------------------------------------------------
    // Motion commands
    // ------------------------------------------------------------------

    /// Power the driver on or off. Powering off drops any motion.
    pub fn enable(&mut self, on: bool) {
        self.driver.power(on);
        self.enabled = on;
        if !on {
            self.tracking = false;
            self.homing = HomingStage::None;
            self.ramp_mode = RampMode::Idle;
            self.frequency = 0.0;
            {
                let mut cs = self.critical();
                cs.target_steps = cs.motor_steps;
                cs.synchronized = false;
            }
        }
        self.apply_frequency();
        debug!("{}: enabled {}", self.name.as_str(), on);
    }

    /// Let the target follow the base rate.
    pub fn set_tracking(&mut self, on: bool) {
        self.tracking = on;
        if !on && !self.ramp_mode.is_active() {
            let mut cs = self.critical();
            cs.target_steps = cs.motor_steps;
        }
        self.apply_frequency();
    }

    /// Set the base rate in measures per second.
    pub fn set_frequency_base(&mut self, frequency: f64) {
        self.base_frequency = frequency;
        self.apply_frequency();
    }

    /// Ramp up to the slew rate in `direction` until stopped.
    pub fn auto_slew(&mut self, direction: Direction) -> CommandResult {
        self.check_motion(direction)?;
        if self.homing.is_active()
            || matches!(self.ramp_mode, RampMode::RampByDistance | RampMode::DecelerateAbort)
        {
            return Err(CommandError::SlewInMotion);
        }
        self.slew_frequency = self.settings.slew_freq;
        self.ramp_mode = match direction {
            Direction::Forward => RampMode::RampByTimeForward,
            Direction::Reverse => RampMode::RampByTimeReverse,
        };
        debug!("{}: slew {}", self.name.as_str(), direction);
        self.apply_frequency();
        Ok(())
    }

    /// Slew to the target, reaching the slew rate after `distance` measures.
    pub fn auto_slew_rate_by_distance(&mut self, distance: f64) -> CommandResult {
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(CommandError::ParamRange);
        }
        self.check_ready()?;
        if self.ramp_mode.is_active() || self.homing.is_active() {
            return Err(CommandError::SlewInMotion);
        }
        if !self.settings.limits.contains(self.target_coordinate()) {
            return Err(CommandError::OutsideLimits);
        }
        let delta = self.steps.target_steps - self.steps.motor_steps;
        if let Some(direction) = Direction::from_sign(delta) {
            if self.limit_sense_active(direction) {
                return Err(CommandError::OutsideLimits);
            }
        }

        let slew = self.settings.slew_freq;
        self.ramp_acceleration = slew * slew / (2.0 * distance);
        self.slew_frequency = slew;
        self.origin_steps = self.steps.motor_steps;
        self.frequency = self.settings.backlash_freq;
        self.ramp_mode = RampMode::RampByDistance;
        {
            let mut cs = self.critical();
            cs.synchronized = false;
            cs.sync_sign = 0;
        }
        debug!("{}: goto ramp over {} steps", self.name.as_str(), delta);
        self.apply_frequency();
        Ok(())
    }

    /// Start sensor homing.
    pub fn auto_slew_home(&mut self) -> CommandResult {
        if self.home_sense.is_none() {
            return Err(CommandError::NotSupported);
        }
        self.check_ready()?;
        if self.ramp_mode.is_active() {
            return Err(CommandError::SlewInMotion);
        }
        self.homing = HomingStage::Fast;
        self.start_homing_stage(self.settings.slew_freq);
        Ok(())
    }

    /// Decelerate to rest at the normal rate. Cancels homing.
    pub fn auto_slew_stop(&mut self) {
        self.homing = HomingStage::None;
        self.begin_deceleration(false);
    }

    /// Decelerate to rest at the abort rate. Cancels homing.
    pub fn auto_slew_abort(&mut self) {
        self.homing = HomingStage::None;
        self.begin_deceleration(true);
    }

    // ------------------------------------------------------------------
    // Poll
    // ------------------------------------------------------------------

    /// Advance the ramp, homing and microstep state machines.
    pub fn poll(&mut self) {
        let fault = self.driver.status().is_fault();
        if fault && !self.fault {
            warn!("{}: driver fault", self.name.as_str());
        }
        self.fault = fault;
        if fault && self.ramp_mode.is_active() {
            self.auto_slew_abort();
        }

        if !self.homing.is_active() && self.ramp_mode.is_active() {
            if let Some(direction) = self.motion_direction() {
                if self.is_blocked(direction) {
                    warn!("{}: limit reached", self.name.as_str());
                    self.auto_slew_abort();
                }
            }
        }

        if self.homing.is_active() && !self.ramp_mode.is_decelerating() {
            let start = self.home_sense_start;
            let changed = self
                .home_sense
                .as_mut()
                .map(|sense| sense.is_active() != start)
                .unwrap_or(false);
            if changed {
                self.begin_deceleration(false);
            }
        }

        self.advance_ramp();

        if self.homing.is_active() && self.ramp_mode == RampMode::Idle {
            let previous = self.slew_frequency;
            self.homing = self.homing.next();
            if self.homing.is_active() {
                self.start_homing_stage(next_stage_frequency(previous, self.settings.min_freq));
            } else {
                info!("{}: homing complete", self.name.as_str());
            }
        }

        self.update_microstep_mode();
        self.apply_frequency();
    }

    fn advance_ramp(&mut self) {
        match self.ramp_mode {
            RampMode::Idle => {}
            RampMode::RampByDistance => {
                let motor = self.steps.motor_steps;
                let remaining = (self.steps.target_steps - motor).abs();
                if remaining == 0 {
                    debug!("{}: goto ramp complete", self.name.as_str());
                    self.frequency = 0.0;
                    self.ramp_mode = RampMode::Idle;
                } else {
                    let from_origin = self.settings.steps_to_measure((motor - self.origin_steps).abs());
                    let to_target = self.settings.steps_to_measure(remaining);
                    self.frequency = distance_frequency(
                        self.ramp_acceleration,
                        from_origin,
                        to_target,
                        self.settings.backlash_freq,
                        self.slew_frequency,
                    );
                }
            }
            RampMode::RampByTimeForward => {
                self.frequency =
                    approach(self.frequency, self.slew_frequency, self.settings.accel_per_poll());
            }
            RampMode::RampByTimeReverse => {
                self.frequency =
                    approach(self.frequency, -self.slew_frequency, self.settings.accel_per_poll());
            }
            RampMode::DecelerateToStop => self.decelerate(self.settings.accel_per_poll()),
            RampMode::DecelerateAbort => self.decelerate(self.settings.abort_per_poll()),
        }
    }

    fn decelerate(&mut self, step: f64) {
        if fabs(self.frequency) <= step {
            self.frequency = 0.0;
            self.ramp_mode = RampMode::Idle;
            if !self.tracking {
                let mut cs = self.critical();
                cs.target_steps = cs.motor_steps;
            }
        } else {
            self.frequency = approach(self.frequency, 0.0, step);
        }
    }

    fn begin_deceleration(&mut self, abort: bool) {
        let mode = if abort {
            RampMode::DecelerateAbort
        } else {
            RampMode::DecelerateToStop
        };
        match self.ramp_mode {
            RampMode::Idle | RampMode::DecelerateAbort => return,
            RampMode::DecelerateToStop if !abort => return,
            RampMode::RampByDistance => {
                // keep moving the same way, now paced by the tick
                let sign = {
                    let mut cs = self.critical();
                    let sign = (cs.target_steps - cs.motor_steps).signum();
                    cs.target_steps = cs.motor_steps;
                    cs.synchronized = true;
                    cs.sync_sign = sign;
                    sign
                };
                self.frequency = sign as f64 * fabs(self.frequency);
            }
            _ => {}
        }
        self.ramp_mode = mode;
        debug!("{}: {}", self.name.as_str(), mode);
        self.apply_frequency();
    }

    fn start_homing_stage(&mut self, frequency: f64) {
        let active = self
            .home_sense
            .as_mut()
            .map(|sense| sense.is_active())
            .unwrap_or(false);
        self.home_sense_start = active;
        self.slew_frequency = frequency;
        self.ramp_mode = if active {
            RampMode::RampByTimeReverse
        } else {
            RampMode::RampByTimeForward
        };
        info!("{}: homing stage {}", self.name.as_str(), self.homing);
        self.apply_frequency();
    }

    fn update_microstep_mode(&mut self) {
        if self.settings.microstep_ratio.is_none() {
            return;
        }
        // coarse pulses cannot close the last few steps of a goto
        let landing = self.ramp_mode == RampMode::RampByDistance
            && (self.steps.target_steps - self.steps.motor_steps).abs() < 2 * self.steps.slew_ratio;
        let f = fabs(self.frequency());
        let enter = !landing && f > SLEW_MODE_ENTER * self.settings.backlash_freq;
        let exit = landing || f < SLEW_MODE_EXIT * self.settings.backlash_freq;

        match self.steps.microstep_mode {
            MicrostepMode::Tracking if enter => {
                self.critical().microstep_mode = MicrostepMode::SlewRequested;
            }
            MicrostepMode::SlewRequested if exit => {
                self.critical().microstep_mode = MicrostepMode::Tracking;
            }
            MicrostepMode::SlewReady if exit => {
                self.critical().microstep_mode = MicrostepMode::Tracking;
            }
            MicrostepMode::SlewReady => {
                let ratio = i64::from(self.driver.set_slew_mode().max(1));
                let mut cs = self.critical();
                cs.step_size = ratio;
                cs.microstep_mode = MicrostepMode::Slewing;
                drop(cs);
                debug!("{}: slew microsteps, ratio {}", self.name.as_str(), ratio);
            }
            MicrostepMode::Slewing if exit => {
                self.driver.set_tracking_mode();
                let mut cs = self.critical();
                cs.step_size = 1;
                cs.microstep_mode = MicrostepMode::Tracking;
                drop(cs);
                debug!("{}: tracking microsteps", self.name.as_str());
            }
            _ => {}
        }
    }

    /// Push the commanded frequency to the step state and the timer.
    fn apply_frequency(&mut self) {
        let commanded = self.frequency();
        let synchronized = self.enabled
            && match self.ramp_mode {
                RampMode::RampByDistance => false,
                RampMode::Idle => self.tracking,
                _ => true,
            };
        let sign = if commanded > 0.0 {
            1
        } else if commanded < 0.0 {
            -1
        } else {
            0
        };

        let step_size = {
            let mut cs = self.critical();
            cs.synchronized = synchronized;
            cs.sync_sign = if synchronized { sign } else { 0 };
            cs.step_size
        };

        // slack is taken up at no less than the backlash rate
        let paced = if self.ramp_mode != RampMode::RampByDistance && self.steps.in_backlash() {
            sign as f64 * fabs(commanded).max(self.settings.backlash_freq)
        } else {
            commanded
        };
        let period = if self.enabled {
            tick_period_sub_micros(paced, self.settings.steps_per_measure, step_size)
        } else {
            0
        };
        if period != self.period {
            self.period = period;
            self.timer.set_period_sub_micros(period);
        }
    }

    // ------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------

    fn check_ready(&mut self) -> CommandResult {
        if !self.enabled {
            return Err(CommandError::SlewInStandby);
        }
        if self.fault || self.driver.status().is_fault() {
            return Err(CommandError::HardwareFault);
        }
        Ok(())
    }

    fn check_motion(&mut self, direction: Direction) -> CommandResult {
        self.check_ready()?;
        if self.is_blocked(direction) {
            return Err(CommandError::OutsideLimits);
        }
        Ok(())
    }

    fn motion_direction(&self) -> Option<Direction> {
        if self.ramp_mode == RampMode::RampByDistance {
            Direction::from_sign(self.steps.target_steps - self.steps.motor_steps)
        } else {
            let f = self.frequency();
            if f > 0.0 {
                Some(Direction::Forward)
            } else if f < 0.0 {
                Some(Direction::Reverse)
            } else {
                None
            }
        }
    }

    /// Soft limit or limit sense blocks motion in `direction`.
    fn is_blocked(&mut self, direction: Direction) -> bool {
        let position = self.instrument_coordinate();
        let past_soft_limit = match direction {
            Direction::Forward => position >= self.settings.limits.max,
            Direction::Reverse => position <= self.settings.limits.min,
        };
        past_soft_limit || self.limit_sense_active(direction)
    }

    fn limit_sense_active(&mut self, direction: Direction) -> bool {
        if self.shared_limit {
            let min = self.min_limit.as_mut().map(|s| s.is_active()).unwrap_or(false);
            let max = self.max_limit.as_mut().map(|s| s.is_active()).unwrap_or(false);
            return min || max;
        }
        let sense = match direction {
            Direction::Forward => self.max_limit.as_mut(),
            Direction::Reverse => self.min_limit.as_mut(),
        };
        sense.map(|s| s.is_active()).unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// One half of a step pulse.
    ///
    /// Call from the timer at the programmed period. A direction change is
    /// written one tick ahead of the pulse that uses it.
    pub fn on_tick(&mut self) -> Result<(), MotorError> {
        if !self.enabled {
            return Ok(());
        }
        let s = &mut self.steps;

        if s.pulse_high {
            self.step_pin.set_low().map_err(|_| MotorError::Pin)?;
            s.pulse_high = false;
            let pulse = s.pending;
            s.pending = 0;
            s.count_pulse(pulse);
            return Ok(());
        }

        if s.microstep_mode == MicrostepMode::SlewRequested
            && (s.motor_steps + s.backlash_steps).rem_euclid(s.slew_ratio) == 0
        {
            s.microstep_mode = MicrostepMode::SlewReady;
        }
        if s.microstep_mode == MicrostepMode::SlewReady {
            return Ok(());
        }

        if s.synchronized && !s.in_backlash() {
            s.target_steps += s.sync_sign * s.step_size;
        }

        let delta = s.target_steps - s.motor_steps;
        let wanted = if delta >= s.step_size {
            Direction::Forward
        } else if delta <= -s.step_size {
            Direction::Reverse
        } else {
            return Ok(());
        };

        if s.direction != Some(wanted) {
            let high = (wanted == Direction::Forward) != self.settings.reverse;
            if high {
                self.dir_pin.set_high().map_err(|_| MotorError::Pin)?;
            } else {
                self.dir_pin.set_low().map_err(|_| MotorError::Pin)?;
            }
            s.direction = Some(wanted);
            return Ok(());
        }

        self.step_pin.set_high().map_err(|_| MotorError::Pin)?;
        s.pending = wanted.sign() * s.step_size;
        s.pulse_high = true;
        Ok(())
    }
}

/// Nearest multiple of `modulus`.
fn snap(steps: i64, modulus: i64) -> i64 {
    if modulus <= 1 {
        return steps;
    }
    (steps + modulus / 2).div_euclid(modulus) * modulus
}
