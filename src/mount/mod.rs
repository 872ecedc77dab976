//! Mount orchestrator for mount-motion.
//!
//! A [`Mount`] owns two axes, the coordinate transform and a sidereal clock,
//! and runs goto, tracking, park, home and meridian flips on top of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use mount_motion::{AxisBuilder, Mount};
//!
//! let config = mount_motion::config::load_config("mount.toml")?;
//! let axis1 = AxisBuilder::new()
//!     .from_config(&config, "axis1")?
//!     .step_pin(step1).dir_pin(dir1).timer(timer1).driver(driver1)
//!     .build()?;
//! let axis2 = /* same for "axis2" */;
//!
//! let mut mount = Mount::new(&config, axis1, axis2, clock);
//! mount.enable(true);
//! mount.goto_equ(&mount.equ_from_ra_dec(ra, dec))?;
//!
//! loop {
//!     mount.poll(); // at config.mount.poll_hz
//! }
//! ```

mod command;
mod goto;
mod home;
mod park;
mod state;
mod tracking;

pub use command::{format_dms, format_hms, parse_dms, parse_hms, Reply};
pub use state::{
    GotoStage, GotoState, GuideDirection, MountFault, ParkState, TrackingRate, TrackingState,
    SIDEREAL_RATE,
};

use state::{Arrival, Guide};

use crate::axis::{Axis, AxisHardware};
use crate::config::{MountConfig, MountLimits, SystemConfig};
use crate::transform::{Coordinate, NoPointingModel, PierSide, PointingModel, SiderealClock, Transform};

/// Two-axis telescope mount.
pub struct Mount<H: AxisHardware, C: SiderealClock, M: PointingModel = NoPointingModel> {
    axis1: Axis<H>,
    axis2: Axis<H>,
    transform: Transform<M>,
    clock: C,
    config: MountConfig,
    limits: MountLimits,

    goto_state: GotoState,
    goto_stage: GotoStage,
    arrival: Arrival,
    destination: Coordinate,
    destination_native: Option<Coordinate>,
    sync_target: Option<Coordinate>,
    pending: Coordinate,

    park_state: ParkState,
    park: Option<Coordinate>,
    finding_home: bool,

    tracking: TrackingState,
    tracking_rate: TrackingRate,
    guide: Option<Guide>,
    rate_delta: (f64, f64),
    fault: Option<MountFault>,
    polls: u32,
}

impl<H: AxisHardware, C: SiderealClock> Mount<H, C, NoPointingModel> {
    /// Create a mount from configuration and its two axes.
    ///
    /// Both axes are declared at the home position and left powered down.
    pub fn new(config: &SystemConfig, axis1: Axis<H>, axis2: Axis<H>, clock: C) -> Self {
        let transform = Transform::from_config(config);
        let park = config.park.map(|p| {
            let mut c = Coordinate::equatorial(p.hour_angle.to_radians(), p.declination.to_radians())
                .on_side(p.pier_side);
            transform.equ_to_hor(&mut c);
            c
        });

        let mut mount = Self {
            axis1,
            axis2,
            transform,
            clock,
            config: config.mount,
            limits: config.limits,
            goto_state: GotoState::None,
            goto_stage: GotoStage::None,
            arrival: Arrival::Track,
            destination: Coordinate::default(),
            destination_native: None,
            sync_target: None,
            pending: Coordinate::default(),
            park_state: ParkState::Unparked,
            park,
            finding_home: false,
            tracking: TrackingState::None,
            tracking_rate: TrackingRate::Sidereal,
            guide: None,
            rate_delta: (0.0, 0.0),
            fault: None,
            polls: 0,
        };
        if let Err(e) = mount.declare_home() {
            warn!("mount: axes moving, home not declared: {}", e);
        }
        mount
    }
}

impl<H: AxisHardware, C: SiderealClock, M: PointingModel> Mount<H, C, M> {
    /// Replace the pointing model.
    pub fn with_pointing_model<N: PointingModel>(self, model: N) -> Mount<H, C, N> {
        Mount {
            axis1: self.axis1,
            axis2: self.axis2,
            transform: self.transform.with_pointing_model(model),
            clock: self.clock,
            config: self.config,
            limits: self.limits,
            goto_state: self.goto_state,
            goto_stage: self.goto_stage,
            arrival: self.arrival,
            destination: self.destination,
            destination_native: self.destination_native,
            sync_target: self.sync_target,
            pending: self.pending,
            park_state: self.park_state,
            park: self.park,
            finding_home: self.finding_home,
            tracking: self.tracking,
            tracking_rate: self.tracking_rate,
            guide: self.guide,
            rate_delta: self.rate_delta,
            fault: self.fault,
            polls: self.polls,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Axis 1 (hour angle or azimuth).
    pub fn axis1(&self) -> &Axis<H> {
        &self.axis1
    }

    /// Axis 2 (declination or altitude).
    pub fn axis2(&self) -> &Axis<H> {
        &self.axis2
    }

    /// Axis 1, for the tick.
    pub fn axis1_mut(&mut self) -> &mut Axis<H> {
        &mut self.axis1
    }

    /// Axis 2, for the tick.
    pub fn axis2_mut(&mut self) -> &mut Axis<H> {
        &mut self.axis2
    }

    /// Coordinate transform.
    pub fn transform(&self) -> &Transform<M> {
        &self.transform
    }

    /// Sidereal clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mount configuration.
    pub fn config(&self) -> &MountConfig {
        &self.config
    }

    /// Goto state.
    pub fn goto_state(&self) -> GotoState {
        self.goto_state
    }

    /// Goto stage.
    pub fn goto_stage(&self) -> GotoStage {
        self.goto_stage
    }

    /// Park state.
    pub fn park_state(&self) -> ParkState {
        self.park_state
    }

    /// Tracking state.
    pub fn tracking_state(&self) -> TrackingState {
        self.tracking
    }

    /// Selected tracking rate.
    pub fn tracking_rate(&self) -> TrackingRate {
        self.tracking_rate
    }

    /// Why tracking last stopped on its own, if it did.
    pub fn fault(&self) -> Option<MountFault> {
        self.fault
    }

    /// Whether a guide pulse is running.
    pub fn is_guiding(&self) -> bool {
        self.guide.is_some()
    }

    /// Destination of the current or last goto, in mount coordinates.
    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    /// Whether sensor homing is running.
    pub fn is_finding_home(&self) -> bool {
        self.finding_home
    }

    /// Greenwich sidereal time from the clock.
    fn gmst(&self) -> f64 {
        self.clock.greenwich_sidereal_time()
    }

    /// Native equatorial coordinate for a right ascension and declination now.
    pub fn equ_from_ra_dec(&self, ra: f64, dec: f64) -> Coordinate {
        let mut c = Coordinate::equatorial(self.transform.site().hour_angle(ra, self.gmst()), dec);
        c.r = ra;
        c
    }

    /// Current position in mount coordinates, from the axes.
    pub fn current(&self) -> Coordinate {
        let mut c = self.transform.instrument_to_mount(
            self.axis1.instrument_coordinate(),
            self.axis2.instrument_coordinate(),
        );
        c.r = self.transform.site().right_ascension(c.h, self.gmst());
        c
    }

    /// Current position as a native sky coordinate.
    pub fn current_native(&self) -> Coordinate {
        let mut c = self.transform.mount_to_native(&self.current());
        c.r = self.transform.site().right_ascension(c.h, self.gmst());
        c
    }

    /// Current pier side.
    pub fn pier_side(&self) -> PierSide {
        self.current().pier_side
    }

    // ------------------------------------------------------------------
    // Power and stop
    // ------------------------------------------------------------------

    /// Power both axes. Powering down stops tracking and guiding.
    pub fn enable(&mut self, on: bool) {
        if !on {
            self.tracking = TrackingState::None;
            self.guide = None;
        }
        self.axis1.enable(on);
        self.axis2.enable(on);
        self.update_rates();
        info!("mount: enabled {}", on);
    }

    /// Stop all motion at the abort rate.
    pub fn stop(&mut self) {
        if self.goto_state.is_slewing() {
            self.goto_state = GotoState::Abort;
        }
        self.finding_home = false;
        self.guide = None;
        self.axis1.auto_slew_abort();
        self.axis2.auto_slew_abort();
        self.update_rates();
        info!("mount: stop");
    }

    // ------------------------------------------------------------------
    // Poll
    // ------------------------------------------------------------------

    /// Run both axes' polls and the mount state machines.
    ///
    /// Call at `poll_hz`.
    pub fn poll(&mut self) {
        self.axis1.poll();
        self.axis2.poll();
        self.polls = self.polls.wrapping_add(1);

        self.poll_guide();
        self.poll_find_home();
        self.poll_goto();
        self.supervise_tracking();

        if self.polls % u32::from(self.config.poll_hz.max(1)) == 0 {
            self.update_rates();
        }
    }

    fn axes_faulted(&self) -> bool {
        self.axis1.fault() || self.axis2.fault()
    }

    fn axes_slewing(&self) -> bool {
        self.axis1.is_slewing() || self.axis2.is_slewing()
    }

    /// Stop tracking when the position leaves the pointing limits.
    fn supervise_tracking(&mut self) {
        if self.tracking != TrackingState::Sidereal || self.goto_state != GotoState::None {
            return;
        }
        let fault = if self.axes_faulted() {
            Some(MountFault::Driver)
        } else {
            self.limit_violation(&self.current())
        };
        if let Some(fault) = fault {
            warn!("mount: tracking stopped, {}", fault);
            self.fault = Some(fault);
            self.tracking = TrackingState::None;
            self.guide = None;
            self.update_rates();
        }
    }

    fn limit_violation(&self, current: &Coordinate) -> Option<MountFault> {
        if current.a < self.limits.horizon.to_radians() {
            return Some(MountFault::Horizon);
        }
        if current.a > self.limits.overhead.to_radians() {
            return Some(MountFault::Overhead);
        }
        if self.transform.mount_type() == crate::config::MountType::Gem {
            match current.pier_side {
                PierSide::East if current.h > self.limits.past_meridian_east.to_radians() => {
                    return Some(MountFault::MeridianEast);
                }
                PierSide::West if current.h < -self.limits.past_meridian_west.to_radians() => {
                    return Some(MountFault::MeridianWest);
                }
                _ => {}
            }
        }
        let axis1 = self.axis1.instrument_coordinate();
        let axis2 = self.axis2.instrument_coordinate();
        if !self.axis1.settings().limits.contains(axis1)
            || !self.axis2.settings().limits.contains(axis2)
        {
            return Some(MountFault::AxisLimit);
        }
        None
    }
}
