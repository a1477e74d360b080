//! Benchmark configuration
//!
//! Runtime options assembled from presets, an optional YAML file and CLI
//! overrides (applied in that order).

use crate::benchmark::comparator::DEFAULT_THRESHOLD_PCT;
use crate::config::{ConfigError, ConfigFileV1, ConfigResult, Preset, TrialOverrides};
use std::path::Path;
use std::time::Duration;

/// Sampling settings for one trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOptions {
    /// Untimed calls before calibration (default: 10)
    pub warmup_iterations: u64,

    /// Samples collected before `max_time` may end the trial (default: 5)
    pub min_samples: usize,

    /// Hard cap on samples (default: 100)
    pub max_samples: usize,

    /// Minimum wall time of one sample; calibration grows the batch
    /// until a sample takes at least this long (default: 10ms)
    pub min_sample_time: Duration,

    /// Sampling budget per trial (default: 1s)
    pub max_time: Duration,
}

impl TrialOptions {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                warmup_iterations: 3,
                min_samples: 5,
                max_samples: 20,
                min_sample_time: Duration::from_millis(5),
                max_time: Duration::from_millis(250),
            },
            Preset::Balanced => Self {
                warmup_iterations: 10,
                min_samples: 5,
                max_samples: 100,
                min_sample_time: Duration::from_millis(10),
                max_time: Duration::from_secs(1),
            },
            Preset::Thorough => Self {
                warmup_iterations: 50,
                min_samples: 10,
                max_samples: 500,
                min_sample_time: Duration::from_millis(25),
                max_time: Duration::from_secs(5),
            },
        }
    }

    pub fn warmup_iterations(mut self, n: u64) -> Self {
        self.warmup_iterations = n;
        self
    }

    pub fn min_samples(mut self, n: usize) -> Self {
        self.min_samples = n;
        self
    }

    pub fn max_samples(mut self, n: usize) -> Self {
        self.max_samples = n;
        self
    }

    pub fn min_sample_time(mut self, d: Duration) -> Self {
        self.min_sample_time = d;
        self
    }

    pub fn max_time(mut self, d: Duration) -> Self {
        self.max_time = d;
        self
    }

    fn apply(mut self, overrides: &TrialOverrides) -> Self {
        if let Some(n) = overrides.warmup_iterations {
            self.warmup_iterations = n;
        }
        if let Some(n) = overrides.min_samples {
            self.min_samples = n;
        }
        if let Some(n) = overrides.max_samples {
            self.max_samples = n;
        }
        if let Some(ms) = overrides.min_sample_time_ms {
            self.min_sample_time = Duration::from_millis(ms);
        }
        if let Some(ms) = overrides.max_time_ms {
            self.max_time = Duration::from_millis(ms);
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_samples == 0 {
            return Err(ConfigError::range_with_hint(
                "trial.min_samples",
                self.min_samples,
                1,
                self.max_samples,
                "At least one sample is needed for a measurement",
            ));
        }
        if self.max_samples < self.min_samples {
            return Err(ConfigError::range_with_hint(
                "trial.max_samples",
                self.max_samples,
                self.min_samples,
                usize::MAX,
                "max_samples must not be below min_samples",
            ));
        }
        Ok(())
    }
}

impl Default for TrialOptions {
    fn default() -> Self {
        Self::preset(Preset::Balanced)
    }
}

/// Complete benchmark configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkOptions {
    /// Significance threshold for the comparator (default: 10%)
    pub threshold_pct: f64,

    /// Trial sampling settings
    pub trial: TrialOptions,

    /// Only run test cases whose name contains this substring
    pub filter: Option<String>,
}

impl BenchmarkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(preset: Preset) -> Self {
        Self {
            trial: TrialOptions::preset(preset),
            ..Self::default()
        }
    }

    /// Load from a YAML file; the result is validated
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_file(ConfigFileV1::from_yaml(path)?)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        Self::from_file(ConfigFileV1::from_yaml_str(content)?)
    }

    fn from_file(file: ConfigFileV1) -> ConfigResult<Self> {
        let mut options = Self::with_preset(file.preset.unwrap_or_default());
        if let Some(threshold) = file.threshold_pct {
            options.threshold_pct = threshold;
        }
        if let Some(overrides) = &file.trial {
            options.trial = options.trial.apply(overrides);
        }
        options.validate()?;
        Ok(options)
    }

    // ═════════════════════════════════════════════════════════════
    // Builder Methods (Fluent API)
    // ═════════════════════════════════════════════════════════════

    pub fn threshold_pct(mut self, pct: f64) -> Self {
        self.threshold_pct = pct;
        self
    }

    pub fn trial(mut self, trial: TrialOptions) -> Self {
        self.trial = trial;
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.threshold_pct.is_finite() || self.threshold_pct < 0.0 {
            return Err(ConfigError::range_with_hint(
                "threshold_pct",
                self.threshold_pct,
                0,
                "inf",
                "The threshold is a percentage, e.g. 10 for ±10%",
            ));
        }
        self.trial.validate()
    }
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            trial: TrialOptions::default(),
            filter: None,
        }
    }
}
