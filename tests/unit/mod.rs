//! Unit test harness for mount-motion.
//!
//! This module organizes unit tests for each component of the library.

mod axis;
mod config_parsing;
mod transform;
