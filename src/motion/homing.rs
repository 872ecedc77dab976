//! Sensor homing stages.

/// Homing stage of one axis.
///
/// Each stage drives towards the home sense edge, stops once the sense
/// changes state, and hands over to the next, slower stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingStage {
    /// Not homing.
    #[default]
    None,
    /// First approach at slew rate.
    Fast,
    /// Second approach.
    Slow,
    /// Final approach.
    Fine,
}

impl HomingStage {
    /// The stage that follows this one.
    pub fn next(self) -> Self {
        match self {
            HomingStage::Fast => HomingStage::Slow,
            HomingStage::Slow => HomingStage::Fine,
            HomingStage::Fine | HomingStage::None => HomingStage::None,
        }
    }

    /// Whether homing is in progress.
    #[inline]
    pub fn is_active(self) -> bool {
        self != HomingStage::None
    }
}

/// Cruise frequency of the stage after one that ran at `previous`.
pub fn next_stage_frequency(previous: f64, min_frequency: f64) -> f64 {
    (previous / 4.0).max(min_frequency)
}
