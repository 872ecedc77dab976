//! Step state shared between the tick and the poll.

use core::ops::{Deref, DerefMut};

use super::hardware::StepTimer;
use crate::motion::Direction;

/// Microstep mode handshake between poll and tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MicrostepMode {
    /// Fine microsteps, one step per pulse.
    #[default]
    Tracking,
    /// Poll wants slew mode; tick looks for an aligned position.
    SlewRequested,
    /// Tick is aligned and holding until poll switches the driver.
    SlewReady,
    /// Coarse microsteps, `ratio` steps per pulse.
    Slewing,
}

/// Position, target and pulse state touched by [`Axis::on_tick`](super::Axis::on_tick).
///
/// Step counts are in tracking microsteps. `motor_steps + backlash_steps` is
/// the number of pulses emitted since reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepState {
    pub(crate) motor_steps: i64,
    pub(crate) target_steps: i64,
    pub(crate) backlash_steps: i64,
    pub(crate) backlash_amount_steps: i64,
    /// Steps per pulse: 1 while tracking, the microstep ratio while slewing.
    pub(crate) step_size: i64,
    /// Target follows the tick at `sync_sign` per tick.
    pub(crate) synchronized: bool,
    pub(crate) sync_sign: i64,
    pub(crate) direction: Option<Direction>,
    pub(crate) pulse_high: bool,
    pub(crate) pending: i64,
    pub(crate) microstep_mode: MicrostepMode,
    /// Tracking microsteps per slew microstep; 1 without slew mode.
    pub(crate) slew_ratio: i64,
}

impl StepState {
    pub(crate) fn new(backlash_amount_steps: i64, slew_ratio: Option<u16>) -> Self {
        Self {
            motor_steps: 0,
            target_steps: 0,
            backlash_steps: 0,
            backlash_amount_steps,
            step_size: 1,
            synchronized: false,
            sync_sign: 0,
            direction: None,
            pulse_high: false,
            pending: 0,
            microstep_mode: MicrostepMode::Tracking,
            slew_ratio: slew_ratio.map(i64::from).unwrap_or(1).max(1),
        }
    }

    /// Motor position in steps.
    pub fn motor_steps(&self) -> i64 {
        self.motor_steps
    }

    /// Target position in steps.
    pub fn target_steps(&self) -> i64 {
        self.target_steps
    }

    /// Slack currently taken up.
    pub fn backlash_steps(&self) -> i64 {
        self.backlash_steps
    }

    /// Slack to take up on reversal.
    pub fn backlash_amount_steps(&self) -> i64 {
        self.backlash_amount_steps
    }

    /// Whether the last pulse direction still has slack to take up.
    pub(crate) fn in_backlash(&self) -> bool {
        match self.direction {
            Some(Direction::Forward) => self.backlash_steps < self.backlash_amount_steps,
            Some(Direction::Reverse) => self.backlash_steps > 0,
            None => false,
        }
    }

    /// Count one pulse of `pulse` signed steps, winding or unwinding backlash first.
    pub(crate) fn count_pulse(&mut self, pulse: i64) {
        if pulse > 0 {
            let take = pulse.min(self.backlash_amount_steps - self.backlash_steps).max(0);
            self.backlash_steps += take;
            self.motor_steps += pulse - take;
        } else if pulse < 0 {
            let take = (-pulse).min(self.backlash_steps).max(0);
            self.backlash_steps -= take;
            self.motor_steps += pulse + take;
        }
    }
}

/// Guard that holds off the tick while the poll side touches [`StepState`].
///
/// Suspends the timer on creation and resumes it on drop.
pub struct CriticalSection<'a, T: StepTimer> {
    timer: &'a mut T,
    state: &'a mut StepState,
}

impl<'a, T: StepTimer> CriticalSection<'a, T> {
    pub(crate) fn new(timer: &'a mut T, state: &'a mut StepState) -> Self {
        timer.suspend();
        Self { timer, state }
    }
}

impl<T: StepTimer> Deref for CriticalSection<'_, T> {
    type Target = StepState;

    fn deref(&self) -> &StepState {
        self.state
    }
}

impl<T: StepTimer> DerefMut for CriticalSection<'_, T> {
    fn deref_mut(&mut self) -> &mut StepState {
        self.state
    }
}

impl<T: StepTimer> Drop for CriticalSection<'_, T> {
    fn drop(&mut self) {
        self.timer.resume();
    }
}
