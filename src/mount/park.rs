//! Park and unpark.

use super::state::{Arrival, GotoState, ParkState, TrackingState};
use super::Mount;
use crate::axis::AxisHardware;
use crate::config::PierSideSelect;
use crate::error::{CommandError, CommandResult};
use crate::transform::{Coordinate, PointingModel, SiderealClock};

impl<H: AxisHardware, C: SiderealClock, M: PointingModel> Mount<H, C, M> {
    /// Saved park position in mount coordinates.
    pub fn park_position(&self) -> Option<Coordinate> {
        self.park
    }

    /// Load a park position from the external store.
    ///
    /// With `parked` set the mount starts out parked and needs [`park_restore`](Self::park_restore).
    pub fn set_park_position(&mut self, park: Coordinate, parked: bool) {
        self.park = Some(park);
        if parked {
            self.park_state = ParkState::Parked;
        }
    }

    /// Save the current position as the park position.
    pub fn park_set(&mut self) -> CommandResult {
        if self.goto_state != GotoState::None {
            return Err(CommandError::SlewInSlew);
        }
        if self.park_state == ParkState::Parked || self.park_state == ParkState::Parking {
            return Err(CommandError::SlewInPark);
        }
        if self.axes_slewing() || self.finding_home {
            return Err(CommandError::SlewInMotion);
        }
        self.park = Some(self.current());
        info!("mount: park position set");
        Ok(())
    }

    /// Slew to the park position and power down on arrival.
    pub fn park_goto(&mut self) -> CommandResult {
        match self.park_state {
            ParkState::Parked => return Ok(()),
            ParkState::ParkFailed => return Err(CommandError::ParkFailed),
            ParkState::Parking | ParkState::Unparked => {}
        }
        let mut park = self.park.ok_or(CommandError::NoParkPositionSet)?;
        self.validate_goto()?;
        // parking never flips
        park.pier_side = self.set_mount_target(&park, PierSideSelect::SameOnly)?;
        self.check_axis_limits(&park)?;
        self.park = Some(park);

        self.park_state = ParkState::Parking;
        if let Err(e) = self.start_goto(park, None, Arrival::Park) {
            self.park_state = ParkState::Unparked;
            return Err(e);
        }
        info!("mount: parking");
        Ok(())
    }

    /// Restore the axis coordinates of a parked mount and power up.
    pub fn park_restore(&mut self, with_tracking: bool) -> CommandResult {
        if self.park_state != ParkState::Parked {
            return Err(CommandError::NotParked);
        }
        let park = self.park.ok_or(CommandError::NoParkPositionSet)?;
        let (a1, a2) = self.transform.mount_to_instrument(&park);
        self.axis1.set_instrument_coordinate_park(a1)?;
        self.axis2.set_instrument_coordinate_park(a2)?;

        self.axis1.enable(true);
        self.axis2.enable(true);
        self.park_state = ParkState::Unparked;
        self.fault = None;
        self.tracking = if with_tracking {
            TrackingState::Sidereal
        } else {
            TrackingState::None
        };
        self.update_rates();
        info!("mount: unparked");
        Ok(())
    }

    /// Clear a failed park.
    pub fn park_reset(&mut self) -> CommandResult {
        match self.park_state {
            ParkState::Parking => Err(CommandError::SlewInSlew),
            ParkState::ParkFailed => {
                self.park_state = ParkState::Unparked;
                Ok(())
            }
            ParkState::Parked | ParkState::Unparked => Ok(()),
        }
    }
}
