//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::mechanism::MechanismConfig;
use super::units::Milliseconds;

/// Maximum number of mechanisms in one configuration.
pub const MAX_MECHANISMS: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Fixed period of the control loop that ticks every mechanism.
    #[serde(default = "default_control_period", rename = "control_period_ms")]
    pub control_period: Milliseconds,

    /// Named mechanism configurations.
    #[serde(default)]
    pub mechanisms: FnvIndexMap<String<32>, MechanismConfig, MAX_MECHANISMS>,
}

fn default_control_period() -> Milliseconds {
    Milliseconds(20.0)
}

impl SystemConfig {
    /// Get a mechanism configuration by name.
    pub fn mechanism(&self, name: &str) -> Option<&MechanismConfig> {
        self.mechanisms
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all mechanism names.
    pub fn mechanism_names(&self) -> impl Iterator<Item = &str> {
        self.mechanisms.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            control_period: default_control_period(),
            mechanisms: FnvIndexMap::new(),
        }
    }
}
