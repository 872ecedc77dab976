//! Goto, sync and meridian flips.

use core::f64::consts::FRAC_PI_2;

use libm::fabs;

use super::state::{Arrival, GotoStage, GotoState, ParkState, TrackingState};
use super::Mount;
use crate::axis::AxisHardware;
use crate::config::{MeridianFlip, MountType, PierSideSelect};
use crate::error::{CommandError, CommandResult};
use crate::transform::{Coordinate, PierSide, PointingModel, SiderealClock};

/// Latitudes closer to the equator than this use the low-latitude waypoints.
const WAYPOINT_LOW_LATITUDE_DEG: f64 = 10.0;
/// Below this altitude the flip passes halfway to the pole.
const WAYPOINT_LOW_ALTITUDE_DEG: f64 = 10.0;

impl<H: AxisHardware, C: SiderealClock, M: PointingModel> Mount<H, C, M> {
    /// Check that a goto may start now.
    pub fn validate_goto(&self) -> CommandResult {
        if self.axes_faulted() {
            return Err(CommandError::HardwareFault);
        }
        if !self.axis1.is_enabled() || !self.axis2.is_enabled() {
            return Err(CommandError::SlewInStandby);
        }
        if self.park_state != ParkState::Unparked {
            return Err(CommandError::SlewInPark);
        }
        if self.goto_state != GotoState::None {
            return Err(CommandError::SlewInSlew);
        }
        if self.guide.is_some() || self.finding_home || self.axes_slewing() {
            return Err(CommandError::SlewInMotion);
        }
        Ok(())
    }

    /// Check a mount coordinate (pier side set) against the pointing and axis limits.
    pub fn validate_goto_coords(&self, coord: &Coordinate) -> CommandResult {
        if coord.a < self.limits.horizon.to_radians() {
            return Err(CommandError::BelowHorizon);
        }
        if coord.a > self.limits.overhead.to_radians() {
            return Err(CommandError::AboveOverhead);
        }
        self.check_axis_limits(coord)
    }

    pub(crate) fn check_axis_limits(&self, coord: &Coordinate) -> CommandResult {
        let (a1, a2) = self.transform.mount_to_instrument(coord);
        if !self.axis1.settings().limits.contains(a1) || !self.axis2.settings().limits.contains(a2) {
            return Err(CommandError::OutsideLimits);
        }
        Ok(())
    }

    /// Choose the pier side for a mount coordinate.
    pub fn set_mount_target(&self, coord: &Coordinate, select: PierSideSelect) -> CommandResult<PierSide> {
        match self.transform.mount_type() {
            MountType::AltAzm => return Ok(PierSide::None),
            MountType::Fork => return Ok(PierSide::East),
            MountType::Gem => {}
        }

        let h = coord.h;
        let east_ok = h <= self.limits.past_meridian_east.to_radians();
        let west_ok = h >= -self.limits.past_meridian_west.to_radians();
        let reachable = |side: PierSide| match side {
            PierSide::East => east_ok,
            PierSide::West => west_ok,
            PierSide::None => false,
        };
        let normal = if h < 0.0 { PierSide::East } else { PierSide::West };
        let current = self.current().pier_side;

        if self.config.meridian_flip == MeridianFlip::Never && current != PierSide::None {
            return if reachable(current) { Ok(current) } else { Err(CommandError::OutsideLimits) };
        }

        let pick = |side: PierSide| if reachable(side) { Ok(side) } else { Err(CommandError::OutsideLimits) };
        let either = |first: PierSide, second: PierSide| {
            if reachable(first) {
                Ok(first)
            } else if reachable(second) {
                Ok(second)
            } else {
                Err(CommandError::OutsideLimits)
            }
        };

        match select {
            PierSideSelect::EastOnly => pick(PierSide::East),
            PierSideSelect::WestOnly => pick(PierSide::West),
            PierSideSelect::East => either(PierSide::East, PierSide::West),
            PierSideSelect::West => either(PierSide::West, PierSide::East),
            PierSideSelect::SameOnly if current != PierSide::None => pick(current),
            PierSideSelect::Best if current != PierSide::None => either(current, other(current)),
            PierSideSelect::SameOnly | PierSideSelect::Best => either(normal, other(normal)),
        }
    }

    /// Intermediate position for a flip from `current`'s pier side to `target`'s, if one is needed.
    pub fn flip_waypoint(&self, current: &Coordinate, target: &Coordinate) -> Option<Coordinate> {
        if self.transform.mount_type() != MountType::Gem
            || self.config.flip_skip_waypoint
            || current.pier_side == PierSide::None
            || current.pier_side == target.pier_side
        {
            return None;
        }

        let sign = if current.pier_side == PierSide::East { -1.0 } else { 1.0 };
        let latitude = self.transform.site().latitude();
        let pole = if self.transform.site().is_northern() { FRAC_PI_2 } else { -FRAC_PI_2 };

        let (h_deg, d) = if fabs(latitude) < WAYPOINT_LOW_LATITUDE_DEG.to_radians() {
            let same_hemisphere = (target.d >= 0.0) == (latitude >= 0.0);
            (if same_hemisphere { 45.0 } else { 60.0 }, 0.0)
        } else if current.a < WAYPOINT_LOW_ALTITUDE_DEG.to_radians() {
            (60.0, pole / 2.0)
        } else {
            (90.0, pole)
        };

        let mut waypoint = Coordinate::equatorial(sign * f64::to_radians(h_deg), d).on_side(current.pier_side);
        self.transform.equ_to_hor(&mut waypoint);
        Some(waypoint)
    }

    /// Goto a native equatorial coordinate (hour angle and declination), then track.
    pub fn goto_equ(&mut self, native: &Coordinate) -> CommandResult {
        self.validate_goto()?;
        let mut target = self.transform.native_to_mount(native);
        target.pier_side = self.set_mount_target(&target, self.config.preferred_pier_side)?;
        self.validate_goto_coords(&target)?;

        let mut native = *native;
        native.r = self.transform.site().right_ascension(native.h, self.gmst());
        self.start_goto(target, Some(native), Arrival::Track)
    }

    /// Declare the mount to be pointing at a native equatorial coordinate.
    ///
    /// When the chosen pier side differs from the current one, the mount first
    /// flips to the new side and syncs on arrival.
    pub fn sync_equ(&mut self, native: &Coordinate) -> CommandResult {
        self.validate_goto()?;
        let mut target = self.transform.native_to_mount(native);
        target.pier_side = self.set_mount_target(&target, self.config.preferred_pier_side)?;
        self.validate_goto_coords(&target)?;

        let current = self.current();
        if self.transform.mount_type() == MountType::Gem
            && current.pier_side != PierSide::None
            && current.pier_side != target.pier_side
        {
            // go where the mount believes the target is, on the new side
            let mut native = *native;
            native.r = self.transform.site().right_ascension(native.h, self.gmst());
            self.sync_target = Some(native);
            let result = self.start_goto(target, Some(native), Arrival::Sync);
            if result.is_err() {
                self.sync_target = None;
            }
            return result;
        }

        self.write_instrument(&target);
        info!("mount: synced");
        self.update_rates();
        Ok(())
    }

    fn write_instrument(&mut self, mount: &Coordinate) {
        let (a1, a2) = self.transform.mount_to_instrument(mount);
        self.axis1.set_instrument_coordinate(a1);
        self.axis2.set_instrument_coordinate(a2);
    }

    fn set_axis_targets(&mut self, coord: &Coordinate) {
        let (a1, a2) = self.transform.mount_to_instrument(coord);
        if self.arrival == Arrival::Park && self.goto_stage == GotoStage::Destination {
            self.axis1.set_target_coordinate_park(a1);
            self.axis2.set_target_coordinate_park(a2);
        } else {
            self.axis1.set_target_coordinate(a1);
            self.axis2.set_target_coordinate(a2);
        }
    }

    fn slew_axes(&mut self) -> CommandResult {
        self.axis1.mark_origin_coordinate();
        self.axis2.mark_origin_coordinate();
        let d1 = self.axis1.settings().accel_distance();
        let d2 = self.axis2.settings().accel_distance();
        self.axis1.auto_slew_rate_by_distance(d1)?;
        if let Err(e) = self.axis2.auto_slew_rate_by_distance(d2) {
            self.axis1.auto_slew_abort();
            return Err(e);
        }
        Ok(())
    }

    /// Start a goto to a validated mount coordinate.
    pub(crate) fn start_goto(
        &mut self,
        target: Coordinate,
        native: Option<Coordinate>,
        arrival: Arrival,
    ) -> CommandResult {
        let current = self.current();
        let waypoint = self.flip_waypoint(&current, &target);
        if let Some(w) = &waypoint {
            self.check_axis_limits(w)?;
        }

        self.destination = target;
        self.destination_native = native;
        self.arrival = arrival;
        self.guide = None;
        self.axis1.set_tracking(false);
        self.axis2.set_tracking(false);
        self.axis1.set_frequency_base(0.0);
        self.axis2.set_frequency_base(0.0);
        self.axis1.disable_backlash();
        self.axis2.disable_backlash();

        let leg = match waypoint {
            Some(w) => {
                self.goto_stage = GotoStage::Waypoint;
                w
            }
            None => {
                self.goto_stage = GotoStage::Destination;
                target
            }
        };
        self.set_axis_targets(&leg);

        if let Err(e) = self.slew_axes() {
            self.goto_stage = GotoStage::None;
            self.axis1.enable_backlash();
            self.axis2.enable_backlash();
            self.update_rates();
            return Err(e);
        }

        self.goto_state = if arrival == Arrival::Sync { GotoState::GotoSync } else { GotoState::Goto };
        info!("mount: goto started, {}, {}", self.goto_stage, target.pier_side);
        Ok(())
    }

    /// Goto stage monitor.
    pub(crate) fn poll_goto(&mut self) {
        match self.goto_state {
            GotoState::None => {}
            GotoState::Abort => {
                if !self.axes_slewing() {
                    self.end_goto();
                    if self.park_state == ParkState::Parking {
                        self.park_state = ParkState::ParkFailed;
                    }
                    warn!("mount: goto aborted");
                }
            }
            GotoState::Goto | GotoState::GotoSync => {
                if self.axes_faulted() {
                    warn!("mount: fault during goto");
                    self.stop();
                    return;
                }
                if self.axes_slewing() {
                    return;
                }
                if !(self.axis1.near_target() && self.axis2.near_target()) {
                    self.end_goto();
                    if self.park_state == ParkState::Parking {
                        self.park_state = ParkState::ParkFailed;
                    }
                    warn!("mount: goto stopped short of target");
                    return;
                }
                if self.goto_stage == GotoStage::Waypoint {
                    self.next_leg();
                } else {
                    self.finish_goto();
                }
            }
        }
    }

    fn next_leg(&mut self) {
        if let Some(mut native) = self.destination_native {
            native.h = self.transform.site().hour_angle(native.r, self.gmst());
            let side = self.destination.pier_side;
            let mut target = self.transform.native_to_mount(&native);
            target.pier_side = side;
            self.destination = target;
        }
        self.goto_stage = GotoStage::Destination;
        let destination = self.destination;
        self.set_axis_targets(&destination);
        if self.slew_axes().is_err() {
            warn!("mount: destination leg rejected");
            self.stop();
            return;
        }
        debug!("mount: waypoint reached");
    }

    fn end_goto(&mut self) {
        self.goto_state = GotoState::None;
        self.goto_stage = GotoStage::None;
        self.sync_target = None;
        self.axis1.enable_backlash();
        self.axis2.enable_backlash();
        self.update_rates();
    }

    fn finish_goto(&mut self) {
        let arrival = self.arrival;
        let sync_target = self.sync_target;
        self.goto_state = GotoState::None;
        self.goto_stage = GotoStage::None;
        self.sync_target = None;
        self.axis1.enable_backlash();
        self.axis2.enable_backlash();

        match arrival {
            Arrival::Park => {
                self.tracking = TrackingState::None;
                self.axis1.enable(false);
                self.axis2.enable(false);
                self.park_state = ParkState::Parked;
                info!("mount: parked");
            }
            Arrival::Home => {
                self.tracking = TrackingState::None;
                info!("mount: at home");
            }
            Arrival::Sync => {
                if let Some(mut native) = sync_target {
                    native.h = self.transform.site().hour_angle(native.r, self.gmst());
                    let mut mount = self.transform.native_to_mount(&native);
                    mount.pier_side = self.destination.pier_side;
                    self.write_instrument(&mount);
                }
                self.tracking = TrackingState::Sidereal;
                info!("mount: flipped and synced");
            }
            Arrival::Track => {
                self.tracking = TrackingState::Sidereal;
                info!("mount: goto complete");
            }
        }
        self.update_rates();
    }
}

fn other(side: PierSide) -> PierSide {
    match side {
        PierSide::East => PierSide::West,
        PierSide::West => PierSide::East,
        PierSide::None => PierSide::None,
    }
}
