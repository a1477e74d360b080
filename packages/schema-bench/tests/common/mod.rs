//! Common test utilities for schema-bench
//!
//! A trial runner that records what was timed and shared case builders.

#![allow(dead_code)]

use schema_bench::benchmark::trial::catch_trial_panic;
use schema_bench::benchmark::{Fixture, Measurement, TestCase, TrialOutcome, TrialRunner};
use schema_bench::schema::Schema;
use serde_json::json;
use std::cell::RefCell;

/// Calls each body once and reports a fixed measurement
#[derive(Default)]
pub struct RecordingRunner {
    pub timed: RefCell<Vec<String>>,
}

impl RecordingRunner {
    pub fn timed(&self) -> Vec<String> {
        self.timed.borrow().clone()
    }
}

impl TrialRunner for RecordingRunner {
    fn run_trial(&self, name: &str, body: &mut dyn FnMut()) -> TrialOutcome {
        self.timed.borrow_mut().push(name.to_string());
        match catch_trial_panic(|| body()) {
            Ok(()) => TrialOutcome::Measured(Measurement {
                hz: 1000.0,
                rme: 0.5,
                size: 10,
            }),
            Err(e) => TrialOutcome::Failed(e),
        }
    }
}

/// `number().min(0)` with both fixtures
pub fn both_case(name: &str) -> TestCase {
    TestCase::new(
        name,
        |_| {
            Fixture::new(Schema::number().min(0))
                .valid(json!(1))
                .invalid(json!(-1))
        },
        |schema, value| schema.validate(value),
    )
}

pub fn valid_only_case(name: &str) -> TestCase {
    TestCase::new(
        name,
        |_| Fixture::new(Schema::string()).valid(json!("ok")),
        |schema, value| schema.validate(value),
    )
}

pub fn invalid_only_case(name: &str) -> TestCase {
    TestCase::new(
        name,
        |_| Fixture::new(Schema::string()).invalid(json!(7)),
        |schema, value| schema.validate(value),
    )
}
