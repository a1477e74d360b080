//! Configuration system
//!
//! YAML file schema, presets and errors. The options the runner consumes are
//! `benchmark::BenchmarkOptions`.

pub mod error;
pub mod io;
pub mod preset;

pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, TrialOverrides};
pub use preset::Preset;

/// Configuration file versions this build reads
pub const SUPPORTED_VERSIONS: &[u32] = &[1];
