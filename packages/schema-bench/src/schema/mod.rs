//! Schema validation library
//!
//! The unit under benchmark: composable schemas over `serde_json::Value`.
//!
//! ```
//! use schema_bench::schema::Schema;
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .key("name", Schema::string().min(3).max(30).required())
//!     .key("age", Schema::number().integer().min(0));
//!
//! assert!(user.validate(&json!({ "name": "ada", "age": 36 })).is_ok());
//! assert!(user.validate(&json!({ "age": -1 })).is_err());
//! ```

pub mod error;
pub mod library;

pub use error::{ErrorDetail, ErrorKind, LibraryError, ValidationError};
pub use library::Library;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex should compile")
});

/// Validation preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Stop at the first error (default: true)
    pub abort_early: bool,

    /// Coerce numeric/boolean strings (default: true)
    pub convert: bool,

    /// Accept undeclared object keys (default: false)
    pub allow_unknown: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            abort_early: true,
            convert: true,
            allow_unknown: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct NumberRules {
    min: Option<i64>,
    max: Option<i64>,
    integer: bool,
}

#[derive(Debug, Clone, Default)]
struct StringRules {
    min: Option<usize>,
    max: Option<usize>,
    pattern: Option<Regex>,
    alphanum: bool,
    email: bool,
}

#[derive(Debug, Clone, Default)]
struct ArrayRules {
    items: Option<Box<Schema>>,
    min: Option<usize>,
    max: Option<usize>,
}

#[derive(Debug, Clone)]
struct Key {
    name: String,
    schema: Schema,
}

#[derive(Debug, Clone)]
enum Kind {
    Any,
    Boolean,
    Number(NumberRules),
    String(StringRules),
    Array(ArrayRules),
    Object(Vec<Key>),
    Alternatives(Vec<Schema>),
}

/// A compiled schema
///
/// Rule builders only affect the kinds they apply to: `min`/`max` bound
/// numbers by value, strings by length and arrays by item count; `integer`
/// on a string is ignored.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: Kind,
    required: bool,
    allow: Vec<Value>,
    prefs: Option<Preferences>,
}

impl Schema {
    fn of(kind: Kind) -> Self {
        Self {
            kind,
            required: false,
            allow: Vec::new(),
            prefs: None,
        }
    }

    // ═════════════════════════════════════════════════════════════
    // Constructors
    // ═════════════════════════════════════════════════════════════

    pub fn any() -> Self {
        Self::of(Kind::Any)
    }

    pub fn boolean() -> Self {
        Self::of(Kind::Boolean)
    }

    pub fn number() -> Self {
        Self::of(Kind::Number(NumberRules::default()))
    }

    pub fn string() -> Self {
        Self::of(Kind::String(StringRules::default()))
    }

    pub fn array() -> Self {
        Self::of(Kind::Array(ArrayRules::default()))
    }

    /// Object schema; with no declared keys any key is accepted
    pub fn object() -> Self {
        Self::of(Kind::Object(Vec::new()))
    }

    pub fn alternatives(options: impl IntoIterator<Item = Schema>) -> Self {
        Self::of(Kind::Alternatives(options.into_iter().collect()))
    }

    // ═════════════════════════════════════════════════════════════
    // Builder Methods (Fluent API)
    // ═════════════════════════════════════════════════════════════

    /// Declare an object key
    pub fn key(mut self, name: impl Into<String>, schema: Schema) -> Self {
        if let Kind::Object(keys) = &mut self.kind {
            keys.push(Key {
                name: name.into(),
                schema,
            });
        }
        self
    }

    /// Element schema for arrays
    pub fn items(mut self, schema: Schema) -> Self {
        if let Kind::Array(rules) = &mut self.kind {
            rules.items = Some(Box::new(schema));
        }
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, n: i64) -> Self {
        match &mut self.kind {
            Kind::Number(rules) => rules.min = Some(n),
            Kind::String(rules) => rules.min = Some(n.max(0) as usize),
            Kind::Array(rules) => rules.min = Some(n.max(0) as usize),
            _ => {}
        }
        self
    }

    pub fn max(mut self, n: i64) -> Self {
        match &mut self.kind {
            Kind::Number(rules) => rules.max = Some(n),
            Kind::String(rules) => rules.max = Some(n.max(0) as usize),
            Kind::Array(rules) => rules.max = Some(n.max(0) as usize),
            _ => {}
        }
        self
    }

    pub fn integer(mut self) -> Self {
        if let Kind::Number(rules) = &mut self.kind {
            rules.integer = true;
        }
        self
    }

    pub fn pattern(mut self, re: Regex) -> Self {
        if let Kind::String(rules) = &mut self.kind {
            rules.pattern = Some(re);
        }
        self
    }

    pub fn alphanum(mut self) -> Self {
        if let Kind::String(rules) = &mut self.kind {
            rules.alphanum = true;
        }
        self
    }

    pub fn email(mut self) -> Self {
        if let Kind::String(rules) = &mut self.kind {
            rules.email = true;
        }
        self
    }

    /// Restrict to an allow-list
    pub fn valid<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allow.extend(values.into_iter().map(Into::into));
        self
    }

    /// Preferences for this schema and everything below it
    pub fn prefs(mut self, prefs: Preferences) -> Self {
        self.prefs = Some(prefs);
        self
    }

    // ═════════════════════════════════════════════════════════════
    // Validation
    // ═════════════════════════════════════════════════════════════

    /// Validate with the schema's own preferences (or the defaults)
    ///
    /// Returns the converted value on success.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_with(value, &Preferences::default())
    }

    /// Validate with explicit preferences; preferences set on the schema win
    pub fn validate_with(
        &self,
        value: &Value,
        prefs: &Preferences,
    ) -> Result<Value, ValidationError> {
        let mut path = Vec::new();
        let mut errors = Vec::new();
        let converted = self.walk(value, &mut path, prefs, &mut errors);
        if errors.is_empty() {
            Ok(converted)
        } else {
            Err(ValidationError { details: errors })
        }
    }

    fn walk(
        &self,
        value: &Value,
        path: &mut Vec<String>,
        prefs: &Preferences,
        errors: &mut Vec<ErrorDetail>,
    ) -> Value {
        let prefs = self.prefs.as_ref().unwrap_or(prefs);

        if !self.allow.is_empty() {
            if !self.allow.contains(value) {
                let allowed = self
                    .allow
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(ErrorDetail::new(
                    path,
                    ErrorKind::Only,
                    format!("must be one of [{}]", allowed),
                ));
            }
            return value.clone();
        }

        match &self.kind {
            Kind::Any => value.clone(),
            Kind::Boolean => match coerce_bool(value, prefs.convert) {
                Some(b) => Value::Bool(b),
                None => {
                    errors.push(ErrorDetail::new(path, ErrorKind::Base, "must be a boolean"));
                    value.clone()
                }
            },
            Kind::Number(rules) => walk_number(rules, value, path, prefs, errors),
            Kind::String(rules) => walk_string(rules, value, path, prefs, errors),
            Kind::Array(rules) => walk_array(rules, value, path, prefs, errors),
            Kind::Object(keys) => walk_object(keys, value, path, prefs, errors),
            Kind::Alternatives(options) => {
                for option in options {
                    let mut scratch = Vec::new();
                    let converted = option.walk(value, path, prefs, &mut scratch);
                    if scratch.is_empty() {
                        return converted;
                    }
                }
                errors.push(ErrorDetail::new(
                    path,
                    ErrorKind::Alternatives,
                    "does not match any of the allowed types",
                ));
                value.clone()
            }
        }
    }
}

fn coerce_bool(value: &Value, convert: bool) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if convert => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_number(value: &Value, convert: bool) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) if convert => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Some(Number::from(i))
            } else {
                s.parse::<f64>().ok().and_then(Number::from_f64)
            }
        }
        _ => None,
    }
}

fn walk_number(
    rules: &NumberRules,
    value: &Value,
    path: &[String],
    prefs: &Preferences,
    errors: &mut Vec<ErrorDetail>,
) -> Value {
    let Some(number) = coerce_number(value, prefs.convert) else {
        errors.push(ErrorDetail::new(path, ErrorKind::Base, "must be a number"));
        return value.clone();
    };
    let n = number.as_f64().unwrap_or(f64::NAN);

    if rules.integer && n.fract() != 0.0 {
        errors.push(ErrorDetail::new(path, ErrorKind::Integer, "must be an integer"));
        if prefs.abort_early {
            return value.clone();
        }
    }
    if let Some(min) = rules.min {
        if n < min as f64 {
            errors.push(ErrorDetail::new(
                path,
                ErrorKind::Min,
                format!("must be greater than or equal to {}", min),
            ));
            if prefs.abort_early {
                return value.clone();
            }
        }
    }
    if let Some(max) = rules.max {
        if n > max as f64 {
            errors.push(ErrorDetail::new(
                path,
                ErrorKind::Max,
                format!("must be less than or equal to {}", max),
            ));
        }
    }
    Value::Number(number)
}

fn walk_string(
    rules: &StringRules,
    value: &Value,
    path: &[String],
    prefs: &Preferences,
    errors: &mut Vec<ErrorDetail>,
) -> Value {
    let Value::String(s) = value else {
        errors.push(ErrorDetail::new(path, ErrorKind::Base, "must be a string"));
        return value.clone();
    };
    let len = s.chars().count();

    let mut failures: Vec<(ErrorKind, String)> = Vec::new();
    if let Some(min) = rules.min {
        if len < min {
            failures.push((
                ErrorKind::Min,
                format!("length must be at least {} characters long", min),
            ));
        }
    }
    if let Some(max) = rules.max {
        if len > max {
            failures.push((
                ErrorKind::Max,
                format!("length must be less than or equal to {} characters long", max),
            ));
        }
    }
    if rules.alphanum && !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        failures.push((
            ErrorKind::Alphanum,
            "must only contain alpha-numeric characters".to_string(),
        ));
    }
    if rules.email && !EMAIL_RE.is_match(s) {
        failures.push((ErrorKind::Email, "must be a valid email".to_string()));
    }
    if let Some(re) = &rules.pattern {
        if !re.is_match(s) {
            failures.push((
                ErrorKind::Pattern,
                format!(
                    "with value \"{}\" fails to match the required pattern: {}",
                    s,
                    re.as_str()
                ),
            ));
        }
    }

    let take = if prefs.abort_early { 1 } else { failures.len() };
    for (kind, rule) in failures.into_iter().take(take) {
        errors.push(ErrorDetail::new(path, kind, rule));
    }
    value.clone()
}

fn walk_array(
    rules: &ArrayRules,
    value: &Value,
    path: &mut Vec<String>,
    prefs: &Preferences,
    errors: &mut Vec<ErrorDetail>,
) -> Value {
    let Value::Array(items) = value else {
        errors.push(ErrorDetail::new(path, ErrorKind::Base, "must be an array"));
        return value.clone();
    };

    if let Some(min) = rules.min {
        if items.len() < min {
            errors.push(ErrorDetail::new(
                path,
                ErrorKind::Min,
                format!("must contain at least {} items", min),
            ));
            if prefs.abort_early {
                return value.clone();
            }
        }
    }
    if let Some(max) = rules.max {
        if items.len() > max {
            errors.push(ErrorDetail::new(
                path,
                ErrorKind::Max,
                format!("must contain less than or equal to {} items", max),
            ));
            if prefs.abort_early {
                return value.clone();
            }
        }
    }

    let Some(schema) = &rules.items else {
        return value.clone();
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        path.push(i.to_string());
        out.push(schema.walk(item, path, prefs, errors));
        path.pop();
        if prefs.abort_early && !errors.is_empty() {
            return value.clone();
        }
    }
    Value::Array(out)
}

fn walk_object(
    keys: &[Key],
    value: &Value,
    path: &mut Vec<String>,
    prefs: &Preferences,
    errors: &mut Vec<ErrorDetail>,
) -> Value {
    let Value::Object(map) = value else {
        errors.push(ErrorDetail::new(path, ErrorKind::Base, "must be of type object"));
        return value.clone();
    };
    if keys.is_empty() {
        return value.clone();
    }

    let mut out = Map::new();
    for key in keys {
        path.push(key.name.clone());
        match map.get(&key.name) {
            Some(child) => {
                let converted = key.schema.walk(child, path, prefs, errors);
                out.insert(key.name.clone(), converted);
            }
            None if key.schema.required => {
                errors.push(ErrorDetail::new(path, ErrorKind::Required, "is required"));
            }
            None => {}
        }
        path.pop();
        if prefs.abort_early && !errors.is_empty() {
            return value.clone();
        }
    }

    for (name, child) in map {
        if keys.iter().any(|k| &k.name == name) {
            continue;
        }
        if prefs.allow_unknown {
            out.insert(name.clone(), child.clone());
            continue;
        }
        path.push(name.clone());
        errors.push(ErrorDetail::new(path, ErrorKind::Unknown, "is not allowed"));
        path.pop();
        if prefs.abort_early {
            return value.clone();
        }
    }
    Value::Object(out)
}
