//! Motion module for mount-motion.
//!
//! Provides the velocity ramp math and the homing stage sequence used by the
//! axis controller.

mod homing;
mod ramp;

pub use homing::{next_stage_frequency, HomingStage};
pub use ramp::{approach, distance_frequency, tick_period_sub_micros, Direction, RampMode};
