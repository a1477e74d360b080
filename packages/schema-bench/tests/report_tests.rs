//! Report persistence tests
//!
//! A saved report must load back unchanged and feed a later comparison.

mod common;

use common::{both_case, RecordingRunner};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use schema_bench::benchmark::report::{json, JsonReporter};
use schema_bench::benchmark::{compare, ErrorInfo, Report, SuiteDriver, TrialResult};
use schema_bench::schema::Library;
use tempfile::TempDir;

fn arb_finite() -> impl Strategy<Value = f64> {
    prop::num::f64::POSITIVE | prop::num::f64::NORMAL | prop::num::f64::ZERO
}

fn arb_result() -> impl Strategy<Value = TrialResult> {
    (
        "[A-Za-z ()]{1,20}",
        arb_finite(),
        arb_finite(),
        0usize..1000,
        prop::option::of(("[a-z ]{1,20}", prop::option::of("[a-z:\n ]{1,40}"))),
    )
        .prop_map(|(name, hz, rme, size, error)| TrialResult {
            name,
            hz,
            rme,
            size,
            error: error.map(|(message, stack)| ErrorInfo { message, stack }),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_saved_report_loads_unchanged(results in prop::collection::vec(arb_result(), 0..10)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.json");
        let report: Report = results.into_iter().collect();

        JsonReporter::save(&report, &path).unwrap();
        let loaded = JsonReporter::load(&path).unwrap();
        prop_assert_eq!(loaded, report);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2048))]

    #[test]
    fn prop_measurements_reparse_exactly(per_op in 1e-9f64..1.0, rme in arb_finite()) {
        let report: Report = [TrialResult::measured("t", 1.0 / per_op, rme, 10)]
            .into_iter()
            .collect();
        let reloaded = json::parse(&json::serialize(&report).unwrap()).unwrap();
        prop_assert_eq!(reloaded, report);
    }
}

#[test]
fn test_saved_run_feeds_next_comparison() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("runs").join("baseline.json");

    let lib = Library::current();
    let mut driver = SuiteDriver::new(&lib, RecordingRunner::default());
    driver.register(both_case("Number"));
    let first = driver.run().unwrap();
    JsonReporter::save(&first, &path).unwrap();

    let previous = JsonReporter::load_previous(&path).unwrap();
    let second = driver.run().unwrap();
    let rows = compare(&second, &previous, 10.0);

    let diffs: Vec<_> = rows
        .iter()
        .map(|r| r.baseline.as_ref().and_then(|b| b.percent_diff))
        .collect();
    assert_eq!(diffs, vec![Some(0.0), Some(0.0)]);
}

#[test]
fn test_report_file_is_bare_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.json");
    let report: Report = [TrialResult::measured("a", 2.5, 1.0, 4)].into_iter().collect();
    JsonReporter::save(&report, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["name"], "a");
    assert!(value[0].get("error").is_none());
}
