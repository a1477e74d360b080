//! Built-in test cases
//!
//! One case per schema kind plus a case whose construction differs between
//! 1.x and 2.x builds. Registration order is report order.

use crate::benchmark::{init_fn, run_fn, Fixture, InitFn, RunFn, TestCase, Versioned};
use crate::schema::{Library, Preferences, Schema};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}$").expect("zip regex should compile"));

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}-\d{4}$").expect("code regex should compile"));

/// 1.x builds reported every error unless told otherwise
const LEGACY_PREFS: Preferences = Preferences {
    abort_early: false,
    convert: true,
    allow_unknown: false,
};

/// Bind a schema to the defaults of the build under test
fn for_build(library: &Library, schema: Schema) -> Schema {
    schema.prefs(library.preferences())
}

fn validate(schema: &Schema, value: &Value) -> Result<Value, crate::schema::ValidationError> {
    schema.validate(value)
}

pub fn builtin() -> Vec<TestCase> {
    vec![
        simple_string(),
        bounded_number(),
        simple_object(),
        nested_object(),
        array_of_objects(),
        alternatives(),
        email(),
        numeric_conversion(),
        allow_list(),
        pattern_string(),
        versioned_user(),
    ]
}

fn simple_string() -> TestCase {
    TestCase::new(
        "Simple string",
        |lib| {
            Fixture::new(for_build(lib, Schema::string().alphanum().min(3).max(30)))
                .valid(json!("abc123"))
                .invalid(json!("ab!"))
        },
        validate,
    )
}

fn bounded_number() -> TestCase {
    TestCase::new(
        "Bounded number",
        |lib| {
            Fixture::new(for_build(lib, Schema::number().integer().min(0).max(150)))
                .valid(json!(42))
                .invalid(json!(151))
        },
        validate,
    )
}

fn simple_object() -> TestCase {
    TestCase::new(
        "Simple object",
        |lib| {
            let schema = Schema::object()
                .key("a", Schema::string().required())
                .key("b", Schema::number());
            Fixture::new(for_build(lib, schema))
                .valid(json!({ "a": "x", "b": 1 }))
                .invalid(json!({ "b": 1 }))
        },
        validate,
    )
}

fn nested_object() -> TestCase {
    TestCase::new(
        "Nested object",
        |lib| {
            let address = Schema::object()
                .key("street", Schema::string().min(1))
                .key("city", Schema::string().required())
                .key("zip", Schema::string().pattern(ZIP_RE.clone()).required());
            let user = Schema::object()
                .key("name", Schema::string().min(1).max(100).required())
                .key("age", Schema::number().integer().min(0))
                .key("address", address.required());
            let schema = Schema::object().key("user", user.required());

            Fixture::new(for_build(lib, schema))
                .valid(json!({
                    "user": {
                        "name": "Ada",
                        "age": 36,
                        "address": { "street": "1 Main St", "city": "London", "zip": "12345" }
                    }
                }))
                .invalid(json!({
                    "user": {
                        "name": "Ada",
                        "address": { "city": "London", "zip": "12a45" }
                    }
                }))
        },
        validate,
    )
}

fn array_of_objects() -> TestCase {
    TestCase::new(
        "Array of objects",
        |lib| {
            let item = Schema::object()
                .key("id", Schema::number().integer().required())
                .key("tag", Schema::string().max(16));
            let schema = Schema::array().items(item).max(100);

            let valid: Vec<Value> = (0..10)
                .map(|i| json!({ "id": i, "tag": format!("t{}", i) }))
                .collect();
            let mut invalid = valid.clone();
            invalid[7] = json!({ "id": 1.5, "tag": "t7" });

            Fixture::new(for_build(lib, schema))
                .valid(Value::Array(valid))
                .invalid(Value::Array(invalid))
        },
        validate,
    )
}

fn alternatives() -> TestCase {
    TestCase::new(
        "Alternatives",
        |lib| {
            let schema = Schema::alternatives([
                Schema::number(),
                Schema::boolean(),
                Schema::string().min(1),
            ]);
            Fixture::new(for_build(lib, schema))
                .valid(json!("hello"))
                .invalid(json!({}))
        },
        validate,
    )
}

fn email() -> TestCase {
    TestCase::new(
        "Email",
        |lib| {
            Fixture::new(for_build(lib, Schema::string().email()))
                .valid(json!("user@example.com"))
        },
        validate,
    )
}

fn numeric_conversion() -> TestCase {
    TestCase::new(
        "Numeric string conversion",
        |lib| {
            let schema = Schema::object()
                .key("count", Schema::number().integer().min(1).required())
                .key("enabled", Schema::boolean());
            Fixture::new(for_build(lib, schema))
                .valid(json!({ "count": "42", "enabled": "true" }))
                .invalid(json!({ "count": "forty-two" }))
        },
        validate,
    )
}

fn allow_list() -> TestCase {
    TestCase::new(
        "Allow-list",
        |lib| {
            Fixture::new(for_build(lib, Schema::string().valid(["red", "green", "blue"])))
                .valid(json!("green"))
                .invalid(json!("purple"))
        },
        validate,
    )
}

fn pattern_string() -> TestCase {
    TestCase::new(
        "Pattern string",
        |lib| {
            Fixture::new(for_build(lib, Schema::string().pattern(CODE_RE.clone())))
                .valid(json!("ABC-1234"))
                .invalid(json!("abc-1234"))
        },
        validate,
    )
}

/// Account schema: 1.x builds have no per-schema preferences and the runner
/// passes them at call time; 2.x builds attach them to the schema.
fn versioned_user() -> TestCase {
    let init: Versioned<InitFn> = Versioned::by_version()
        .on(
            "1.",
            init_fn(|_| Fixture::new(account()).valid(account_ok()).invalid(account_bad())),
        )
        .on(
            "2.",
            init_fn(|lib| {
                let schema = account().key("email", Schema::string().email());
                Fixture::new(for_build(lib, schema))
                    .valid(account_ok())
                    .invalid(account_bad())
            }),
        );
    let run: Versioned<RunFn> = Versioned::by_version()
        .on("1.", run_fn(|schema, value| schema.validate_with(value, &LEGACY_PREFS)))
        .on("2.", run_fn(validate));

    TestCase::versioned("Versioned account", init, run)
}

fn account() -> Schema {
    Schema::object()
        .key("username", Schema::string().alphanum().min(3).max(30).required())
        .key("password", Schema::string().min(8).required())
}

fn account_ok() -> Value {
    json!({ "username": "ada1815", "password": "correct-horse" })
}

fn account_bad() -> Value {
    json!({ "username": "a!", "password": "short" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{BenchmarkError, FixtureKind};
    use pretty_assertions::assert_eq;

    fn check_guard(library: &Library) {
        for case in builtin() {
            let resolved = case.resolve(library).unwrap();
            for (kind, name) in resolved.trial_names().unwrap() {
                let input = resolved.input(kind).unwrap();
                let accepted = resolved.validate(input).is_ok();
                assert_eq!(
                    accepted,
                    kind == FixtureKind::Valid,
                    "{} on library {}",
                    name,
                    library.version()
                );
            }
        }
    }

    #[test]
    fn test_builtin_fixtures_pass_guard_on_current_build() {
        check_guard(&Library::current());
    }

    #[test]
    fn test_builtin_fixtures_pass_guard_on_legacy_build() {
        check_guard(&Library::with_version("1.4.0"));
    }

    #[test]
    fn test_names_are_unique() {
        let cases = builtin();
        let mut names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), cases.len());
    }

    #[test]
    fn test_email_is_valid_only() {
        let library = Library::current();
        let case = email();
        let names = case.resolve(&library).unwrap().trial_names().unwrap();
        assert_eq!(names, vec![(FixtureKind::Valid, "Email".to_string())]);
    }

    #[test]
    fn test_unknown_major_fails_dispatch() {
        let library = Library::with_version("3.0.0");
        let err = versioned_user().resolve(&library).err().unwrap();
        assert!(matches!(err, BenchmarkError::Dispatch { .. }));
    }

    #[test]
    fn test_legacy_runner_reports_every_error() {
        let library = Library::with_version("1.0.0");
        let case = versioned_user();
        let resolved = case.resolve(&library).unwrap();
        let err = resolved.validate(&account_bad()).unwrap_err();
        assert!(err.details.len() >= 2);

        let current = Library::current();
        let resolved = case.resolve(&current).unwrap();
        let err = resolved.validate(&account_bad()).unwrap_err();
        assert_eq!(err.details.len(), 1);
    }
}
