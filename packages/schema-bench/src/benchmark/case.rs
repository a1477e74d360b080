//! Test case definitions

use crate::benchmark::dispatch::Versioned;
use crate::benchmark::{BenchmarkError, BenchmarkResult};
use crate::schema::{Library, Schema, ValidationError};
use serde_json::Value;
use std::fmt;

/// Builds the unit under test and its fixtures
pub type InitFn = Box<dyn Fn(&Library) -> Fixture>;

/// Runs the validator once; `Err` is the validation error, not a trial failure
pub type RunFn = Box<dyn Fn(&Schema, &Value) -> Result<Value, ValidationError>>;

pub fn init_fn(f: impl Fn(&Library) -> Fixture + 'static) -> InitFn {
    Box::new(f)
}

pub fn run_fn(f: impl Fn(&Schema, &Value) -> Result<Value, ValidationError> + 'static) -> RunFn {
    Box::new(f)
}

/// A schema plus optional valid/invalid inputs
#[derive(Debug, Clone)]
pub struct Fixture {
    pub schema: Schema,
    pub valid: Option<Value>,
    pub invalid: Option<Value>,
}

impl Fixture {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            valid: None,
            invalid: None,
        }
    }

    pub fn valid(mut self, value: Value) -> Self {
        self.valid = Some(value);
        self
    }

    pub fn invalid(mut self, value: Value) -> Self {
        self.invalid = Some(value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    Valid,
    Invalid,
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureKind::Valid => f.write_str("valid"),
            FixtureKind::Invalid => f.write_str("invalid"),
        }
    }
}

/// Named benchmark case
#[derive(Debug)]
pub struct TestCase {
    pub name: String,
    pub init: Versioned<InitFn>,
    pub run: Versioned<RunFn>,
}

impl TestCase {
    /// Case with one factory and one runner for every build
    pub fn new(
        name: impl Into<String>,
        init: impl Fn(&Library) -> Fixture + 'static,
        run: impl Fn(&Schema, &Value) -> Result<Value, ValidationError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            init: Versioned::Any(init_fn(init)),
            run: Versioned::Any(run_fn(run)),
        }
    }

    pub fn versioned(
        name: impl Into<String>,
        init: Versioned<InitFn>,
        run: Versioned<RunFn>,
    ) -> Self {
        Self {
            name: name.into(),
            init,
            run,
        }
    }

    /// Resolve both dispatch targets against `library` and build the fixture
    pub fn resolve(&self, library: &Library) -> BenchmarkResult<ResolvedCase<'_>> {
        let dispatch_err = |source| BenchmarkError::Dispatch {
            case: self.name.clone(),
            source,
        };
        let init = self.init.resolve(library.version()).map_err(dispatch_err)?;
        let run = self.run.resolve(library.version()).map_err(dispatch_err)?;

        Ok(ResolvedCase {
            name: &self.name,
            fixture: init(library),
            run,
        })
    }
}

/// A case bound to one library build
pub struct ResolvedCase<'a> {
    pub name: &'a str,
    pub fixture: Fixture,
    pub run: &'a RunFn,
}

impl ResolvedCase<'_> {
    pub fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        (self.run)(&self.fixture.schema, input)
    }

    /// Trial names in registration order
    ///
    /// Both fixtures: `"<name> (valid)"`, `"<name> (invalid)"`. A lone valid
    /// fixture keeps the bare name.
    pub fn trial_names(&self) -> BenchmarkResult<Vec<(FixtureKind, String)>> {
        match (&self.fixture.valid, &self.fixture.invalid) {
            (None, None) => Err(BenchmarkError::MissingFixtures(self.name.to_string())),
            (Some(_), None) => Ok(vec![(FixtureKind::Valid, self.name.to_string())]),
            (None, Some(_)) => Ok(vec![(
                FixtureKind::Invalid,
                format!("{} (invalid)", self.name),
            )]),
            (Some(_), Some(_)) => Ok(vec![
                (FixtureKind::Valid, format!("{} (valid)", self.name)),
                (FixtureKind::Invalid, format!("{} (invalid)", self.name)),
            ]),
        }
    }

    pub fn input(&self, kind: FixtureKind) -> Option<&Value> {
        match kind {
            FixtureKind::Valid => self.fixture.valid.as_ref(),
            FixtureKind::Invalid => self.fixture.invalid.as_ref(),
        }
    }
}
