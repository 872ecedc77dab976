//! Tracking rates, guiding and rate compensation.

use libm::fabs;

use super::state::{Guide, GuideDirection, GotoState, ParkState, TrackingRate, TrackingState, SIDEREAL_RATE};
use super::Mount;
use crate::axis::AxisHardware;
use crate::config::{CompensationMode, MountType};
use crate::error::{CommandError, CommandResult};
use crate::transform::{angle_difference, normalize_pm_pi, Coordinate, PierSide, PointingModel, SiderealClock};

/// Half of the interval the compensated rate is differenced over, in seconds.
const COMPENSATION_HALF_SPAN: f64 = 30.0;
/// Compensated rates are clamped to this multiple of sidereal.
const MAX_RATE_MULTIPLE: f64 = 10.0;

impl<H: AxisHardware, C: SiderealClock, M: PointingModel> Mount<H, C, M> {
    /// Start or stop tracking.
    pub fn set_tracking(&mut self, on: bool) -> CommandResult {
        if on {
            if self.park_state == ParkState::Parked || self.park_state == ParkState::Parking {
                return Err(CommandError::SlewInPark);
            }
            if !self.axis1.is_enabled() || !self.axis2.is_enabled() {
                return Err(CommandError::SlewInStandby);
            }
            if self.axes_faulted() {
                return Err(CommandError::HardwareFault);
            }
            if self.goto_state != GotoState::None {
                return Err(CommandError::SlewInSlew);
            }
            self.fault = None;
            self.tracking = TrackingState::Sidereal;
        } else {
            self.tracking = TrackingState::None;
        }
        self.update_rates();
        debug!("mount: tracking {}", on);
        Ok(())
    }

    /// Select the tracking rate.
    pub fn set_tracking_rate(&mut self, rate: TrackingRate) -> CommandResult {
        if let TrackingRate::Custom(m) = rate {
            if !(m.is_finite() && fabs(m) <= MAX_RATE_MULTIPLE) {
                return Err(CommandError::ParamRange);
            }
        }
        self.tracking_rate = rate;
        self.update_rates();
        Ok(())
    }

    /// Manual per-axis rate offsets in radians per second.
    pub fn set_rate_delta(&mut self, axis1: f64, axis2: f64) -> CommandResult {
        let max = MAX_RATE_MULTIPLE * SIDEREAL_RATE;
        if !(axis1.is_finite() && axis2.is_finite()) || fabs(axis1) > max || fabs(axis2) > max {
            return Err(CommandError::ParamRange);
        }
        self.rate_delta = (axis1, axis2);
        self.update_rates();
        Ok(())
    }

    /// Guide at `rate` (multiple of sidereal) for `duration_ms`.
    pub fn guide(&mut self, direction: GuideDirection, rate: f64, duration_ms: u32) -> CommandResult {
        if self.park_state == ParkState::Parked || self.park_state == ParkState::Parking {
            return Err(CommandError::SlewInPark);
        }
        if self.goto_state != GotoState::None {
            return Err(CommandError::SlewInSlew);
        }
        if !self.axis1.is_enabled() || !self.axis2.is_enabled() {
            return Err(CommandError::SlewInStandby);
        }
        if !(rate > 0.0 && rate <= MAX_RATE_MULTIPLE) || duration_ms == 0 {
            return Err(CommandError::ParamRange);
        }

        let speed = rate * SIDEREAL_RATE;
        let flip = if self.current().pier_side == PierSide::West { -1.0 } else { 1.0 };
        let (axis1_rate, axis2_rate) = match direction {
            GuideDirection::West => (speed, 0.0),
            GuideDirection::East => (-speed, 0.0),
            GuideDirection::North => (0.0, flip * speed),
            GuideDirection::South => (0.0, -flip * speed),
        };
        self.guide = Some(Guide { axis1_rate, axis2_rate, remaining_ms: i64::from(duration_ms) });
        self.update_rates();
        debug!("mount: guide {} for {} ms", direction, duration_ms);
        Ok(())
    }

    /// End any guide pulse.
    pub fn guide_stop(&mut self) {
        if self.guide.take().is_some() {
            self.update_rates();
        }
    }

    pub(crate) fn poll_guide(&mut self) {
        let step = 1000 / i64::from(self.config.poll_hz.max(1));
        let done = match self.guide.as_mut() {
            Some(guide) => {
                guide.remaining_ms -= step.max(1);
                guide.remaining_ms <= 0
            }
            None => false,
        };
        if done {
            self.guide = None;
            self.update_rates();
        }
    }

    /// Tracking rates of both axes before guide and manual offsets, radians per second.
    pub fn tracking_rates(&self) -> (f64, f64) {
        if self.tracking != TrackingState::Sidereal {
            return (0.0, 0.0);
        }
        let sidereal = SIDEREAL_RATE * self.tracking_rate.multiplier();
        let mode = self.config.tracking_compensation;
        if self.transform.mount_type() != MountType::AltAzm && mode == CompensationMode::None {
            return (sidereal, 0.0);
        }

        let current = self.current();
        let native = self.transform.mount_to_native(&current);
        let dh = sidereal * COMPENSATION_HALF_SPAN;
        let ahead = self.instrument_at(native, dh, mode, current.pier_side);
        let behind = self.instrument_at(native, -dh, mode, current.pier_side);

        let max = MAX_RATE_MULTIPLE * SIDEREAL_RATE;
        let span = 2.0 * COMPENSATION_HALF_SPAN;
        let r1 = angle_difference(ahead.0, behind.0) / span;
        let r2 = angle_difference(ahead.1, behind.1) / span;
        (r1.clamp(-max, max), r2.clamp(-max, max))
    }

    fn instrument_at(&self, native: Coordinate, dh: f64, mode: CompensationMode, side: PierSide) -> (f64, f64) {
        let mut c = native;
        c.h = normalize_pm_pi(c.h + dh);
        let mut m = match mode {
            CompensationMode::None => {
                let mut m = c;
                self.transform.equ_to_hor(&mut m);
                m
            }
            CompensationMode::Refraction => self.transform.topocentric_to_observed(c),
            CompensationMode::Full => self.transform.native_to_mount(&c),
        };
        m.pier_side = side;
        self.transform.mount_to_instrument(&m)
    }

    /// Recompute and push the axis base rates.
    pub(crate) fn update_rates(&mut self) {
        if self.goto_state != GotoState::None {
            return;
        }
        let (mut r1, mut r2) = self.tracking_rates();
        if let Some(guide) = &self.guide {
            r1 += guide.axis1_rate;
            r2 += guide.axis2_rate;
        }
        r1 += self.rate_delta.0;
        r2 += self.rate_delta.1;

        let moving = self.tracking == TrackingState::Sidereal
            || self.guide.is_some()
            || self.rate_delta != (0.0, 0.0);
        self.axis1.set_frequency_base(r1);
        self.axis2.set_frequency_base(r2);
        self.axis1.set_tracking(moving && self.axis1.is_enabled());
        self.axis2.set_tracking(moving && self.axis2.is_enabled());
    }
}
