//! Suite orchestration
//!
//! Two phases: every registered case is resolved and checked against its
//! fixtures first, then trials are timed one at a time in registration order.
//! A guard failure aborts before anything is timed; a panic during timing is
//! recorded on that trial only.

use crate::benchmark::case::{FixtureKind, ResolvedCase, TestCase};
use crate::benchmark::result::{Report, TrialOutcome, TrialResult};
use crate::benchmark::trial::TrialRunner;
use crate::benchmark::{BenchmarkError, BenchmarkResult};
use crate::schema::Library;
use std::hint::black_box;
use tracing::{debug, info, warn};

/// One fixture of a resolved case, ready to time
struct PlannedTrial {
    name: String,
    fixture: FixtureKind,
}

struct PlannedCase<'a> {
    case: ResolvedCase<'a>,
    trials: Vec<PlannedTrial>,
}

/// Benchmark orchestrator
pub struct SuiteDriver<'l, R: TrialRunner> {
    library: &'l Library,
    runner: R,
    cases: Vec<TestCase>,
    filter: Option<String>,
}

impl<'l, R: TrialRunner> SuiteDriver<'l, R> {
    pub fn new(library: &'l Library, runner: R) -> Self {
        Self {
            library,
            runner,
            cases: Vec::new(),
            filter: None,
        }
    }

    /// Skip cases whose name does not contain `filter`
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn register(&mut self, case: TestCase) -> &mut Self {
        if let Some(filter) = &self.filter {
            if !case.name.contains(filter.as_str()) {
                debug!("Skipping '{}' (filter '{}')", case.name, filter);
                return self;
            }
        }
        self.cases.push(case);
        self
    }

    pub fn register_all(&mut self, cases: impl IntoIterator<Item = TestCase>) -> &mut Self {
        for case in cases {
            self.register(case);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn library(&self) -> &Library {
        self.library
    }

    /// Trial names the run would produce, after the validation guard
    pub fn trial_names(&self) -> BenchmarkResult<Vec<String>> {
        Ok(self
            .plan()?
            .into_iter()
            .flat_map(|planned| planned.trials.into_iter().map(|t| t.name))
            .collect())
    }

    /// Guard and time every registered case
    pub fn run(&self) -> BenchmarkResult<Report> {
        let plan = self.plan()?;
        let total: usize = plan.iter().map(|p| p.trials.len()).sum();
        info!(
            "Running {} trial(s) against library {}",
            total,
            self.library.version()
        );

        let mut report = Report::new();
        for planned in &plan {
            let case = &planned.case;
            for trial in &planned.trials {
                let Some(input) = case.input(trial.fixture) else {
                    continue;
                };
                let schema = &case.fixture.schema;
                let run = case.run;

                let outcome = self.runner.run_trial(&trial.name, &mut || {
                    black_box(run(black_box(schema), black_box(input)).is_ok());
                });

                match &outcome {
                    TrialOutcome::Measured(m) => info!(
                        "{} x {:.0} ops/sec ±{:.2}% ({} runs sampled)",
                        trial.name, m.hz, m.rme, m.size
                    ),
                    TrialOutcome::Failed(e) => warn!("{} failed: {}", trial.name, e.message),
                }
                report.push(TrialResult::from_outcome(trial.name.clone(), outcome));
            }
        }
        Ok(report)
    }

    fn plan(&self) -> BenchmarkResult<Vec<PlannedCase<'_>>> {
        let mut plan = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let resolved = case.resolve(self.library)?;
            debug!(
                "Resolved '{}' for library {}",
                resolved.name,
                self.library.version()
            );

            let mut trials = Vec::new();
            for (fixture, name) in resolved.trial_names()? {
                if let Some(input) = resolved.input(fixture) {
                    guard(&resolved, fixture, input)?;
                }
                trials.push(PlannedTrial { name, fixture });
            }
            plan.push(PlannedCase {
                case: resolved,
                trials,
            });
        }
        Ok(plan)
    }
}

/// The valid fixture must pass and the invalid fixture must fail
fn guard(
    case: &ResolvedCase<'_>,
    fixture: FixtureKind,
    input: &serde_json::Value,
) -> BenchmarkResult<()> {
    let detail = match (fixture, case.validate(input)) {
        (FixtureKind::Valid, Err(err)) => format!("was rejected: {}", err),
        (FixtureKind::Invalid, Ok(_)) => "was accepted".to_string(),
        _ => return Ok(()),
    };
    Err(BenchmarkError::GuardViolation {
        case: case.name.to_string(),
        fixture,
        detail,
    })
}
