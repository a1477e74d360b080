//! Benchmark result types

use serde::{Deserialize, Serialize};

/// Failure captured from a timed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Stack trace when captured, the message otherwise
    pub fn stack_or_message(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

/// Statistics of one completed trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Operations per second
    pub hz: f64,
    /// Relative margin of error (%)
    pub rme: f64,
    /// Sample count
    pub size: usize,
}

/// What a trial produced: a measurement or a captured failure
#[derive(Debug, Clone, PartialEq)]
pub enum TrialOutcome {
    Measured(Measurement),
    Failed(ErrorInfo),
}

/// One report entry
///
/// Field order is the persisted order: `name, hz, rme, size, error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub name: String,
    pub hz: f64,
    pub rme: f64,
    pub size: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl TrialResult {
    pub fn from_outcome(name: impl Into<String>, outcome: TrialOutcome) -> Self {
        match outcome {
            TrialOutcome::Measured(m) => Self::measured(name, m.hz, m.rme, m.size),
            TrialOutcome::Failed(error) => Self {
                name: name.into(),
                hz: 0.0,
                rme: 0.0,
                size: 0,
                error: Some(error),
            },
        }
    }

    pub fn measured(name: impl Into<String>, hz: f64, rme: f64, size: usize) -> Self {
        Self {
            name: name.into(),
            hz,
            rme,
            size,
            error: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Ordered trial results of one run
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    results: Vec<TrialResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: TrialResult) {
        self.results.push(result);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrialResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// First entry with exactly this name
    pub fn find(&self, name: &str) -> Option<&TrialResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Entries with a captured error, in report order
    pub fn errors(&self) -> impl Iterator<Item = &TrialResult> {
        self.results.iter().filter(|r| r.is_failed())
    }
}

impl FromIterator<TrialResult> for Report {
    fn from_iter<I: IntoIterator<Item = TrialResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a TrialResult;
    type IntoIter = std::slice::Iter<'a, TrialResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
