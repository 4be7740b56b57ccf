//! Check vocabulary: the pure predicates behind validation rules.
//!
//! Every check reads values from a [`FormSnapshot`] and reports whether the
//! condition it encodes is violated. Checks are plain data so whole rule
//! sets can be stored as JSON and loaded back.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::FormSnapshot;

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A regex compiled when the check is built or deserialized.
///
/// An invalid pattern can never reach evaluation.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.0.is_match(s)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self(re)
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<Pattern> for String {
    fn from(p: Pattern) -> Self {
        p.as_str().to_string()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// JSON value types accepted by [`Check::TypeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// A violation predicate over a form snapshot.
///
/// Length, range, pattern and type checks do not enforce presence: a missing
/// value passes them. Pair them with [`Check::Required`] when the field is
/// mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Value is missing, null, whitespace-only or an empty array.
    Required { key: String },
    /// Every listed key is blank.
    AnyPresent { keys: Vec<String> },
    /// String shorter than `min` characters.
    MinLength { key: String, min: usize },
    /// String longer than `max` characters.
    MaxLength { key: String, max: usize },
    /// Number (or numeric string) below `min`.
    MinValue { key: String, min: f64 },
    /// Number (or numeric string) above `max`.
    MaxValue { key: String, max: f64 },
    /// Both values numeric and `key` greater than `other`.
    NotGreaterThan { key: String, other: String },
    /// Non-blank value outside `values`.
    OneOf { key: String, values: Vec<Value> },
    /// Non-empty string not matching `pattern`.
    Pattern { key: String, pattern: Pattern },
    /// Present value of the wrong JSON type.
    TypeCheck { key: String, expected: ValueType },
    /// Array with fewer than `min` items; missing counts as empty.
    MinItems { key: String, min: usize },
    /// Array with more than `max` items.
    MaxItems { key: String, max: usize },
    /// `then` is only evaluated when the value at `key` equals `equals`.
    When {
        key: String,
        equals: Value,
        then: Box<Check>,
    },
    /// Some object in the array at `key` violates `check`.
    EachItem { key: String, check: Box<Check> },
}

impl Check {
    pub fn required(key: impl Into<String>) -> Self {
        Self::Required { key: key.into() }
    }

    pub fn any_present<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyPresent {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn min_length(key: impl Into<String>, min: usize) -> Self {
        Self::MinLength {
            key: key.into(),
            min,
        }
    }

    pub fn max_length(key: impl Into<String>, max: usize) -> Self {
        Self::MaxLength {
            key: key.into(),
            max,
        }
    }

    pub fn min_value(key: impl Into<String>, min: f64) -> Self {
        Self::MinValue {
            key: key.into(),
            min,
        }
    }

    pub fn max_value(key: impl Into<String>, max: f64) -> Self {
        Self::MaxValue {
            key: key.into(),
            max,
        }
    }

    pub fn not_greater_than(key: impl Into<String>, other: impl Into<String>) -> Self {
        Self::NotGreaterThan {
            key: key.into(),
            other: other.into(),
        }
    }

    pub fn one_of<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pattern(key: impl Into<String>, pattern: impl Into<Pattern>) -> Self {
        Self::Pattern {
            key: key.into(),
            pattern: pattern.into(),
        }
    }

    /// Build a pattern check from source text, rejecting invalid regexes.
    pub fn pattern_str(key: impl Into<String>, pattern: &str) -> Result<Self, CoreError> {
        let key = key.into();
        let compiled = Pattern::new(pattern).map_err(|e| CoreError::InvalidRule {
            field: key.clone(),
            reason: format!("Invalid regex pattern: {e}"),
        })?;
        Ok(Self::pattern(key, compiled))
    }

    pub fn type_check(key: impl Into<String>, expected: ValueType) -> Self {
        Self::TypeCheck {
            key: key.into(),
            expected,
        }
    }

    pub fn min_items(key: impl Into<String>, min: usize) -> Self {
        Self::MinItems {
            key: key.into(),
            min,
        }
    }

    pub fn max_items(key: impl Into<String>, max: usize) -> Self {
        Self::MaxItems {
            key: key.into(),
            max,
        }
    }

    pub fn when(key: impl Into<String>, equals: impl Into<Value>, then: Check) -> Self {
        Self::When {
            key: key.into(),
            equals: equals.into(),
            then: Box::new(then),
        }
    }

    pub fn each_item(key: impl Into<String>, check: Check) -> Self {
        Self::EachItem {
            key: key.into(),
            check: Box::new(check),
        }
    }

    /// Returns `true` when the snapshot violates this check.
    pub fn is_violated(&self, snapshot: &FormSnapshot) -> bool {
        match self {
            Self::Required { key } => is_blank(snapshot.get(key)),
            Self::AnyPresent { keys } => keys.iter().all(|k| is_blank(snapshot.get(k))),
            Self::MinLength { key, min } => {
                text(snapshot, key).is_some_and(|s| s.chars().count() < *min)
            }
            Self::MaxLength { key, max } => {
                text(snapshot, key).is_some_and(|s| s.chars().count() > *max)
            }
            Self::MinValue { key, min } => number(snapshot, key).is_some_and(|n| n < *min),
            Self::MaxValue { key, max } => number(snapshot, key).is_some_and(|n| n > *max),
            Self::NotGreaterThan { key, other } => {
                match (number(snapshot, key), number(snapshot, other)) {
                    (Some(a), Some(b)) => a > b,
                    _ => false,
                }
            }
            Self::OneOf { key, values } => {
                let value = snapshot.get(key);
                match value {
                    Some(v) if !is_blank(value) => !values.contains(v),
                    _ => false,
                }
            }
            Self::Pattern { key, pattern } => {
                text(snapshot, key).is_some_and(|s| !s.is_empty() && !pattern.is_match(s))
            }
            Self::TypeCheck { key, expected } => match snapshot.get(key) {
                Some(v) if !v.is_null() => !expected.matches(v),
                _ => false,
            },
            Self::MinItems { key, min } => match snapshot.get(key) {
                None | Some(Value::Null) => *min > 0,
                Some(Value::Array(items)) => items.len() < *min,
                Some(_) => false,
            },
            Self::MaxItems { key, max } => match snapshot.get(key) {
                Some(Value::Array(items)) => items.len() > *max,
                _ => false,
            },
            Self::When { key, equals, then } => {
                let actual = snapshot.get(key).unwrap_or(&Value::Null);
                actual == equals && then.is_violated(snapshot)
            }
            Self::EachItem { key, check } => match snapshot.get(key) {
                Some(Value::Array(items)) => items.iter().any(|item| match item.as_object() {
                    Some(obj) => check.is_violated(obj),
                    None => check.is_violated(&FormSnapshot::new()),
                }),
                _ => false,
            },
        }
    }
}

/// Missing, null, whitespace-only string, or empty array.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn text<'a>(snapshot: &'a FormSnapshot, key: &str) -> Option<&'a str> {
    snapshot.get(key).and_then(Value::as_str)
}

/// Form inputs often carry numbers as strings; both forms are accepted.
/// `NaN` and infinities are not numbers a form can submit.
fn number(snapshot: &FormSnapshot, key: &str) -> Option<f64> {
    let n = match snapshot.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
