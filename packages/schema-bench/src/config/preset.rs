//! Trial presets

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sampling effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Smoke runs (CI), ~0.25s per trial
    Fast,
    /// Day-to-day comparisons, ~1s per trial
    #[default]
    Balanced,
    /// Release baselines, ~5s per trial
    Thorough,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Preset::Fast),
            "balanced" => Ok(Preset::Balanced),
            "thorough" => Ok(Preset::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}
