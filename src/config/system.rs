//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::limits::MountLimits;
use super::mount::{MountConfig, ParkConfig};
use super::site::SiteConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Mount geometry and behavior.
    #[serde(default)]
    pub mount: MountConfig,

    /// Observing site.
    #[serde(default)]
    pub site: SiteConfig,

    /// Pointing limits.
    #[serde(default)]
    pub limits: MountLimits,

    /// Saved park position.
    #[serde(default)]
    pub park: Option<ParkConfig>,

    /// Named axis configurations (`axis1`, `axis2`).
    pub axes: FnvIndexMap<String<32>, AxisConfig, 4>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mount: MountConfig::default(),
            site: SiteConfig::default(),
            limits: MountLimits::default(),
            park: None,
            axes: FnvIndexMap::new(),
        }
    }
}
