//! Schema interpreter.
//!
//! Two levels of evaluation: every field of the schema is checked (no
//! short-circuit across fields), and within a field the first failing rule
//! ends that field's evaluation.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde::Serialize;

use super::schema::{FieldSpec, ValidationSchema};
use super::SchemaError;

/// Anything that can hand out a field's raw value by name.
pub trait FieldValues {
    fn value(&self, field: &str) -> Option<&str>;
}

impl<K, V, S> FieldValues for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(AsRef::as_ref)
    }
}

impl<K, V> FieldValues for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(AsRef::as_ref)
    }
}

impl<V: AsRef<str>> FieldValues for [(&str, V)] {
    fn value(&self, field: &str) -> Option<&str> {
        self.iter()
            .find(|(name, _)| *name == field)
            .map(|(_, v)| v.as_ref())
    }
}

impl<V: AsRef<str>, const N: usize> FieldValues for [(&str, V); N] {
    fn value(&self, field: &str) -> Option<&str> {
        self.as_slice().value(field)
    }
}

/// Outcome of validating a whole form.
///
/// Holds the first failing message per field. Validity is derived from the
/// error map, so a result can never claim to be valid while holding errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: BTreeMap<String, String>,
}

impl ValidationResult {
    /// A result carrying a single error.
    pub fn with_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.errors.insert(field.into(), message.into());
        result
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Validate one field of `schema`.
///
/// Returns the message of the first failing rule, or `None` when every rule
/// passes. An absent value only fails the field's `Required` rule.
///
/// # Errors
///
/// [`SchemaError::UnknownField`] if `field` is not declared in the schema,
/// [`SchemaError::InvalidPattern`] if one of its patterns does not compile.
pub fn validate_field(
    schema: &ValidationSchema,
    field: &str,
    value: Option<&str>,
) -> Result<Option<String>, SchemaError> {
    let spec = schema
        .get(field)
        .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;
    spec.check()?;
    first_failure(spec, value)
}

/// Validate every field declared in `schema` against `values`.
///
/// Keys of `values` that the schema does not declare are ignored; declared
/// fields missing from `values` are treated as absent.
///
/// # Errors
///
/// Returns a [`SchemaError`] if the schema itself is malformed. Failing
/// values are never an error; they are reported in the [`ValidationResult`].
pub fn validate_form<V>(schema: &ValidationSchema, values: &V) -> Result<ValidationResult, SchemaError>
where
    V: FieldValues + ?Sized,
{
    schema.check()?;

    let mut result = ValidationResult::default();
    for spec in schema.fields() {
        if let Some(message) = first_failure(spec, values.value(spec.name()))? {
            result.errors.insert(spec.name().to_string(), message);
        }
    }
    Ok(result)
}

fn first_failure(spec: &FieldSpec, value: Option<&str>) -> Result<Option<String>, SchemaError> {
    let Some(raw) = value else {
        return Ok(spec.required_message().map(str::to_string));
    };
    let value = if spec.trims() { raw.trim() } else { raw };

    let mut failure = None;
    for rule in spec.rules() {
        if !rule.passes(spec.name(), value)? {
            failure = Some(rule.message().to_string());
            break;
        }
    }
    Ok(failure)
}
