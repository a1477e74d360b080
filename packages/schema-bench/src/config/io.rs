//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema types. Applying them to options lives in
//! `benchmark::config`.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::SUPPORTED_VERSIONS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// YAML Schema v1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base trial preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Significance threshold (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_pct: Option<f64>,

    /// Fine-grained trial overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<TrialOverrides>,
}

/// Trial overrides; unset fields keep the preset value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmup_iterations: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_samples: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sample_time_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_ms: Option<u64>,
}

impl ConfigFileV1 {
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: Self = serde_yaml::from_str(content)?;
        match file.version {
            None => Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => Ok(file),
        }
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
