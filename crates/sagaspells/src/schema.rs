//! # Dataset Validation
//!
//! Raw catalog JSON is untrusted: it is hand-maintained, and older exports stored numeric
//! fields as strings. This module turns a [`serde_json::Value`] into typed [`Spell`]s,
//! collecting *every* problem instead of stopping at the first one, so a broken dataset
//! can be fixed in one pass.
//!
//! ## Shape
//!
//! The top level must be an array. Each element must be an object with:
//!
//! | Field | Accepted |
//! |-------|----------|
//! | `spellName`, `spellClass`, `school`, `range`, `target`, `action`, `duration`, `check`, `skill`, `focus`, `spellType` | string |
//! | `keywords`, `description`, `altDescription` | string or null |
//! | `complexity`, `flare` | number, numeric string, or null (coerced, see below) |
//!
//! Every listed field must be present. Unknown fields are ignored. A required string that
//! holds anything else fails validation; it is never stringified.
//!
//! ## Numeric Coercion
//!
//! - `null` → `0`
//! - string → leading integer (`"12"` → 12, `"3 (max)"` → 3), or `0` if there is none
//! - integral number → unchanged
//!
//! Fractional numbers, booleans, arrays and objects are rejected.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::model::Spell;

const REQUIRED_STRINGS: &[&str] = &[
    "spellName",
    "spellClass",
    "school",
    "range",
    "target",
    "action",
    "duration",
    "check",
    "skill",
    "focus",
    "spellType",
];

/// One violation of the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Location in the document, e.g. `[3].spellName`.
    pub path: String,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path, self.expected, self.found
        )
    }
}

/// Every issue found in a dataset, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn single(path: impl Into<String>, expected: impl Into<String>, found: &Value) -> Self {
        Self {
            issues: vec![ValidationIssue {
                path: path.into(),
                expected: expected.into(),
                found: kind_of(Some(found)).to_string(),
            }],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        write!(f, "{} issue{}", count, if count == 1 { "" } else { "s" })?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result of [`validate_safe`]. Never an error; the failure is carried as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(Vec<Spell>),
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn data(&self) -> Option<&[Spell]> {
        match self {
            ValidationOutcome::Valid(spells) => Some(spells),
            ValidationOutcome::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Invalid(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<Vec<Spell>, ValidationError> {
        match self {
            ValidationOutcome::Valid(spells) => Ok(spells),
            ValidationOutcome::Invalid(err) => Err(err),
        }
    }
}

/// Validates and coerces a raw spell dataset.
pub fn validate(raw: &Value) -> Result<Vec<Spell>, ValidationError> {
    let Value::Array(items) = raw else {
        return Err(ValidationError::single("$", "array", raw));
    };

    let mut issues = Vec::new();
    let mut spells = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let path = format!("[{}]", i);
        let Value::Object(obj) = item else {
            issues.push(issue(&path, "object", Some(item)));
            continue;
        };
        if let Some(spell) = spell_from_object(obj, &path, &mut issues) {
            spells.push(spell);
        }
    }

    if issues.is_empty() {
        Ok(spells)
    } else {
        Err(ValidationError { issues })
    }
}

/// Same as [`validate`] but reports failure as a value, for callers that must degrade
/// gracefully.
pub fn validate_safe(raw: &Value) -> ValidationOutcome {
    match validate(raw) {
        Ok(spells) => ValidationOutcome::Valid(spells),
        Err(err) => {
            tracing::warn!(issues = err.issues.len(), "spell dataset failed validation");
            ValidationOutcome::Invalid(err)
        }
    }
}

fn spell_from_object(
    obj: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Spell> {
    let mut fields = FieldReader::new(obj, path, issues);

    let strings: Vec<Option<String>> = REQUIRED_STRINGS
        .iter()
        .map(|name| fields.required_str(name))
        .collect();
    let complexity = fields.lenient_int("complexity");
    let flare = fields.lenient_int("flare");
    let keywords = fields.nullable_str("keywords");
    let description = fields.nullable_str("description");
    let alt_description = fields.nullable_str("altDescription");

    if !fields.clean() {
        return None;
    }

    // Field order follows REQUIRED_STRINGS.
    let mut strings = strings.into_iter();
    let mut next = || strings.next().flatten().unwrap_or_default();
    Some(Spell {
        spell_name: next(),
        spell_class: next(),
        school: next(),
        range: next(),
        target: next(),
        action: next(),
        duration: next(),
        check: next(),
        skill: next(),
        focus: next(),
        spell_type: next(),
        complexity: complexity.unwrap_or_default(),
        flare: flare.unwrap_or_default(),
        keywords: keywords.flatten(),
        description: description.flatten(),
        alt_description: alt_description.flatten(),
    })
}

/// Reads typed fields off a JSON object, recording an issue for each mismatch.
pub(crate) struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    path: &'a str,
    issues: &'a mut Vec<ValidationIssue>,
    failed: bool,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        obj: &'a Map<String, Value>,
        path: &'a str,
        issues: &'a mut Vec<ValidationIssue>,
    ) -> Self {
        Self {
            obj,
            path,
            issues,
            failed: false,
        }
    }

    /// `true` if no field read so far has failed.
    pub(crate) fn clean(&self) -> bool {
        !self.failed
    }

    fn fail(&mut self, field: &str, expected: &str, found: Option<&Value>) {
        self.issues
            .push(issue(&format!("{}.{}", self.path, field), expected, found));
        self.failed = true;
    }

    pub(crate) fn required_str(&mut self, field: &str) -> Option<String> {
        let obj = self.obj;
        match obj.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                self.fail(field, "string", other);
                None
            }
        }
    }

    /// Present and either a string or null. `Some(None)` means an explicit null.
    pub(crate) fn nullable_str(&mut self, field: &str) -> Option<Option<String>> {
        let obj = self.obj;
        match obj.get(field) {
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(Value::Null) => Some(None),
            other => {
                self.fail(field, "string or null", other);
                None
            }
        }
    }

    /// May be absent or null; otherwise must be a string.
    pub(crate) fn optional_str(&mut self, field: &str) -> Option<String> {
        let obj = self.obj;
        match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                self.fail(field, "string", other);
                None
            }
        }
    }

    /// May be absent or null (read as empty); otherwise an array of strings.
    pub(crate) fn string_list(&mut self, field: &str) -> Vec<String> {
        let obj = self.obj;
        match obj.get(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        other => {
                            self.fail(&format!("{}[{}]", field, i), "string", Some(other));
                        }
                    }
                }
                out
            }
            other => {
                self.fail(field, "array of strings", other);
                Vec::new()
            }
        }
    }

    pub(crate) fn lenient_int(&mut self, field: &str) -> Option<i64> {
        let obj = self.obj;
        let value = obj.get(field);
        match value.and_then(coerce_int) {
            Some(n) => Some(n),
            None => {
                self.fail(field, "number, numeric string or null", value);
                None
            }
        }
    }
}

fn issue(path: &str, expected: &str, found: Option<&Value>) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        expected: expected.to_string(),
        found: kind_of(found).to_string(),
    }
}

fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Applies the numeric coercion rules. `None` means the value is not acceptable at all.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::String(s) => Some(parse_leading_int(s).unwrap_or(0)),
        Value::Number(n) => {
            // Float casts truncate toward zero and saturate at the i64 bounds.
            let truncated = n.as_f64().map_or(0, |f| f as i64);
            Some(n.as_i64().unwrap_or(truncated))
        }
        _ => None,
    }
}

/// Parses the integer at the start of `s`: leading whitespace and one sign are allowed,
/// parsing stops at the first non-digit. Values past the i64 bounds saturate. `None` when no
/// digit follows.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(value)
}

/// Serde adapter applying [`coerce_int`], used when reading persisted spells.
pub fn deserialize_lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_int(&value).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "expected number, numeric string or null, found {}",
            kind_of(Some(&value))
        ))
    })
}
