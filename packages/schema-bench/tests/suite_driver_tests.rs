//! Suite driver integration tests
//!
//! - Trial naming and ordering
//! - Validation guard runs before any timing
//! - Version dispatch failures are fatal

mod common;

use common::{both_case, invalid_only_case, valid_only_case, RecordingRunner};
use pretty_assertions::assert_eq;
use schema_bench::benchmark::{
    init_fn, run_fn, BenchmarkError, Fixture, FixtureKind, SuiteDriver, TestCase, Versioned,
};
use schema_bench::schema::{Library, Schema};
use schema_bench::suites;
use serde_json::json;

#[test]
fn test_trials_follow_registration_order() {
    let lib = Library::current();
    let runner = RecordingRunner::default();
    let mut driver = SuiteDriver::new(&lib, &runner);
    driver.register_all([
        both_case("B"),
        valid_only_case("A"),
        invalid_only_case("C"),
    ]);

    let report = driver.run().unwrap();
    let names: Vec<_> = report.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["B (valid)", "B (invalid)", "A", "C (invalid)"]);
    assert_eq!(runner.timed(), names);
}

#[test]
fn test_guard_failure_stops_before_timing() {
    let lib = Library::current();
    let runner = RecordingRunner::default();
    let mut driver = SuiteDriver::new(&lib, &runner);
    driver.register(both_case("first"));
    driver.register(TestCase::new(
        "strict",
        |_| Fixture::new(Schema::number().max(0)).valid(json!(5)),
        |schema, value| schema.validate(value),
    ));

    match driver.run() {
        Err(BenchmarkError::GuardViolation { case, fixture, .. }) => {
            assert_eq!(case, "strict");
            assert_eq!(fixture, FixtureKind::Valid);
        }
        other => panic!("expected guard violation, got {:?}", other),
    }
    assert!(runner.timed().is_empty());
}

#[test]
fn test_case_without_fixtures_is_rejected() {
    let lib = Library::current();
    let mut driver = SuiteDriver::new(&lib, RecordingRunner::default());
    driver.register(TestCase::new(
        "empty",
        |_| Fixture::new(Schema::any()),
        |schema, value| schema.validate(value),
    ));
    assert!(matches!(
        driver.run(),
        Err(BenchmarkError::MissingFixtures(ref name)) if name == "empty"
    ));
}

#[test]
fn test_dispatch_picks_matching_build() {
    let case = || {
        TestCase::versioned(
            "versioned",
            Versioned::by_version()
                .on(
                    "1.",
                    init_fn(|_| Fixture::new(Schema::string()).valid(json!("one"))),
                )
                .on(
                    "2.",
                    init_fn(|_| Fixture::new(Schema::number()).valid(json!(2))),
                ),
            Versioned::Any(run_fn(|schema, value| schema.validate(value))),
        )
    };

    for version in ["1.9.9", "2.0.0"] {
        let lib = Library::with_version(version);
        let mut driver = SuiteDriver::new(&lib, RecordingRunner::default());
        driver.register(case());
        assert_eq!(driver.run().unwrap().len(), 1, "version {}", version);
    }

    let lib = Library::with_version("0.9.0");
    let mut driver = SuiteDriver::new(&lib, RecordingRunner::default());
    driver.register(case());
    assert!(matches!(
        driver.run(),
        Err(BenchmarkError::Dispatch { ref case, .. }) if case == "versioned"
    ));
}

#[test]
fn test_builtin_suite_runs_on_both_builds() {
    for lib in [Library::current(), Library::with_version("1.4.0")] {
        let runner = RecordingRunner::default();
        let mut driver = SuiteDriver::new(&lib, &runner);
        driver.register_all(suites::builtin());

        let report = driver.run().unwrap();
        assert_eq!(report.errors().count(), 0);
        assert!(report.find("Email").is_some());
        assert!(report.find("Versioned account (valid)").is_some());
        assert_eq!(report.len(), runner.timed().len());
    }
}
