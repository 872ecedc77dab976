//! Home position and sensor homing.

use core::f64::consts::FRAC_PI_2;

use super::state::{Arrival, GotoState, ParkState, TrackingState};
use super::Mount;
use crate::axis::AxisHardware;
use crate::config::MountType;
use crate::error::{CommandError, CommandResult};
use crate::transform::{Coordinate, PierSide, PointingModel, SiderealClock};

impl<H: AxisHardware, C: SiderealClock, M: PointingModel> Mount<H, C, M> {
    /// Home position in mount coordinates.
    ///
    /// GEM: counterweight down, pointing at the pole on the east side.
    /// Fork: meridian at the pole. Alt-az: north on the horizon.
    pub fn home_position(&self) -> Coordinate {
        let pole = if self.transform.site().is_northern() { FRAC_PI_2 } else { -FRAC_PI_2 };
        let mut c = match self.transform.mount_type() {
            MountType::Gem => Coordinate::equatorial(-FRAC_PI_2, pole).on_side(PierSide::East),
            MountType::Fork => Coordinate::equatorial(0.0, pole).on_side(PierSide::East),
            MountType::AltAzm => {
                let mut c = Coordinate::horizon(0.0, 0.0);
                self.transform.hor_to_equ(&mut c);
                return c;
            }
        };
        self.transform.equ_to_hor(&mut c);
        c
    }

    pub(crate) fn declare_home(&mut self) -> CommandResult {
        if self.axes_slewing() {
            return Err(CommandError::SlewInMotion);
        }
        let (a1, a2) = self.transform.mount_to_instrument(&self.home_position());
        self.axis1.reset_position_steps(0)?;
        self.axis2.reset_position_steps(0)?;
        self.axis1.set_instrument_coordinate(a1);
        self.axis2.set_instrument_coordinate(a2);
        Ok(())
    }

    /// Declare the mount to be at its home position.
    pub fn reset_home(&mut self) -> CommandResult {
        if self.goto_state != GotoState::None {
            return Err(CommandError::SlewInSlew);
        }
        if self.park_state == ParkState::Parked || self.park_state == ParkState::Parking {
            return Err(CommandError::SlewInPark);
        }
        self.declare_home()?;
        self.tracking = TrackingState::None;
        self.guide = None;
        self.fault = None;
        self.park_state = ParkState::Unparked;
        self.update_rates();
        info!("mount: home reset");
        Ok(())
    }

    /// Slew to the home position without tracking afterwards.
    pub fn return_home(&mut self) -> CommandResult {
        self.validate_goto()?;
        let home = self.home_position();
        self.check_axis_limits(&home)?;
        self.start_goto(home, None, Arrival::Home)
    }

    /// Home both axes on their sensors, then reset to the home position.
    pub fn find_home(&mut self) -> CommandResult {
        if !self.axis1.has_home_sense() || !self.axis2.has_home_sense() {
            return Err(CommandError::NotSupported);
        }
        self.validate_goto()?;

        self.tracking = TrackingState::None;
        self.update_rates();
        self.axis1.auto_slew_home()?;
        if let Err(e) = self.axis2.auto_slew_home() {
            self.axis1.auto_slew_abort();
            return Err(e);
        }
        self.finding_home = true;
        info!("mount: finding home");
        Ok(())
    }

    pub(crate) fn poll_find_home(&mut self) {
        if !self.finding_home || self.axis1.is_homing() || self.axis2.is_homing() || self.axes_slewing() {
            return;
        }
        self.finding_home = false;
        if self.axes_faulted() {
            warn!("mount: homing ended by fault");
            return;
        }
        if self.reset_home().is_err() {
            warn!("mount: home reset refused");
        }
    }
}
