//! Benchmark system
//!
//! - Version-dispatched test cases with valid/invalid fixtures
//! - Validation guard before anything is timed
//! - Sampled ops/sec trials with relative margin of error
//! - Regression comparison against a previous run (default ±10% threshold)
//! - Reporting (JSON, Markdown, Terminal)
//!
//! # Examples
//!
//! ```no_run
//! use schema_bench::benchmark::{compare, JsonReporter, SampledTrialRunner, SuiteDriver, TrialOptions};
//! use schema_bench::schema::Library;
//! use schema_bench::suites;
//!
//! let library = Library::current();
//! let mut driver = SuiteDriver::new(&library, SampledTrialRunner::new(TrialOptions::default()));
//! driver.register_all(suites::builtin());
//! let report = driver.run().unwrap();
//!
//! let previous = JsonReporter::load("bench.json").unwrap();
//! let rows = compare(&report, &previous, 10.0);
//! ```

pub mod case;
pub mod comparator;
pub mod config;
pub mod dispatch;
pub mod report;
pub mod result;
pub mod stats;
pub mod suite;
pub mod trial;

pub use case::{init_fn, run_fn, Fixture, FixtureKind, InitFn, ResolvedCase, RunFn, TestCase};
pub use comparator::{
    compare, regressions, rows_without_baseline, Baseline, ComparisonRow, Verdict,
    DEFAULT_THRESHOLD_PCT,
};
pub use config::{BenchmarkOptions, TrialOptions};
pub use dispatch::{DispatchError, Versioned};
pub use report::{JsonReporter, MarkdownReporter, ReportMeta, TerminalReporter};
pub use result::{ErrorInfo, Measurement, Report, TrialOutcome, TrialResult};
pub use suite::SuiteDriver;
pub use trial::{SampledTrialRunner, TrialRunner};

use crate::config::ConfigError;
use crate::schema::LibraryError;

#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    #[error("Test case '{case}': {source}")]
    Dispatch {
        case: String,
        #[source]
        source: DispatchError,
    },

    #[error("Test case '{0}' defines neither a valid nor an invalid fixture")]
    MissingFixtures(String),

    #[error("Test case '{case}': {fixture} fixture {detail}")]
    GuardViolation {
        case: String,
        fixture: FixtureKind,
        detail: String,
    },

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type BenchmarkResult<T> = std::result::Result<T, BenchmarkError>;
