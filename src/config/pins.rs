//! Sense input wiring.

use serde::Deserialize;

/// How a sense input (home switch, limit switch) is wired.
///
/// In TOML: `pin = "disabled"`, `pin = "shared"` or `pin = { pull_up = 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinConfig {
    /// Not fitted.
    #[default]
    Disabled,
    /// Shares the pin of the opposite limit on the same axis.
    Shared,
    /// Plain input on the given pin.
    Direct(u8),
    /// Input with internal pull-up.
    PullUp(u8),
    /// Input with internal pull-down.
    PullDown(u8),
}

impl PinConfig {
    /// Whether an input is wired at all.
    pub fn is_enabled(self) -> bool {
        !matches!(self, PinConfig::Disabled)
    }

    /// Pin number, if this config owns one.
    pub fn pin(self) -> Option<u8> {
        match self {
            PinConfig::Direct(p) | PinConfig::PullUp(p) | PinConfig::PullDown(p) => Some(p),
            PinConfig::Disabled | PinConfig::Shared => None,
        }
    }
}

/// Logic level at which a sense reads as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Active when the pin reads high.
    #[default]
    High,
    /// Active when the pin reads low.
    Low,
}

/// One sense input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct SenseConfig {
    /// Wiring.
    #[serde(default)]
    pub pin: PinConfig,
    /// Active level.
    #[serde(default)]
    pub active: ActiveLevel,
}

/// The sense inputs of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct AxisSenses {
    /// Home switch.
    #[serde(default)]
    pub home: SenseConfig,
    /// Limit switch at the minimum end of travel.
    #[serde(default)]
    pub min: SenseConfig,
    /// Limit switch at the maximum end of travel.
    #[serde(default)]
    pub max: SenseConfig,
}

impl AxisSenses {
    /// Whether both limits are served by one input.
    pub fn limits_shared(&self) -> bool {
        self.min.pin == PinConfig::Shared || self.max.pin == PinConfig::Shared
    }
}
