//! Declarative rule schemas.
//!
//! A [`ValidationSchema`] is an ordered list of [`FieldSpec`]s; each field
//! carries an ordered list of [`FieldRule`]s. Rules run in the order they were
//! declared, so the builder call order decides which message a user sees when
//! a value breaks several rules at once.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use regex::Regex;

use super::SchemaError;

/// A caller-supplied check. Returns `true` when the value is acceptable.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A regular expression kept as source text and compiled on first use.
///
/// Compilation is deferred so that a bad pattern is reported by the
/// validation call that needs it, as [`SchemaError::InvalidPattern`].
pub struct Pattern {
    source: String,
    compiled: OnceCell<Result<Regex, regex::Error>>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn regex(&self) -> Result<&Regex, regex::Error> {
        self.compiled
            .get_or_init(|| Regex::new(&self.source))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// The check a rule performs.
pub enum RuleKind {
    /// Value must be present and non-empty.
    Required,
    /// Value must match the regular expression (unanchored unless the pattern is).
    Pattern(Pattern),
    /// Value must be at least this many characters long.
    MinLength(usize),
    /// Value must satisfy the predicate.
    Custom(Predicate),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => f.write_str("Required"),
            RuleKind::Pattern(p) => p.fmt(f),
            RuleKind::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
            RuleKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One rule paired with the message shown when it fails.
#[derive(Debug)]
pub struct FieldRule {
    kind: RuleKind,
    message: String,
}

impl FieldRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the rule against a present value.
    pub(crate) fn passes(&self, field: &str, value: &str) -> Result<bool, SchemaError> {
        Ok(match &self.kind {
            RuleKind::Required => !value.is_empty(),
            RuleKind::Pattern(pattern) => pattern
                .regex()
                .map_err(|source| SchemaError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })?
                .is_match(value),
            RuleKind::MinLength(min) => value.chars().count() >= *min,
            RuleKind::Custom(predicate) => predicate(value),
        })
    }
}

/// A named field and its ordered rules.
#[derive(Debug)]
pub struct FieldSpec {
    name: String,
    trim: bool,
    rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trim: false,
            rules: Vec::new(),
        }
    }

    /// Strip leading/trailing whitespace from the value before any rule runs.
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(RuleKind::Required, message)
    }

    pub fn pattern(self, source: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(RuleKind::Pattern(Pattern::new(source)), message)
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(RuleKind::MinLength(min), message)
    }

    pub fn custom<F>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(RuleKind::Custom(Arc::new(predicate)), message)
    }

    pub fn rule(mut self, kind: RuleKind, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::new(kind, message));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trims(&self) -> bool {
        self.trim
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// The message of this field's `Required` rule, if it has one.
    pub fn required_message(&self) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| matches!(r.kind, RuleKind::Required))
            .map(FieldRule::message)
    }

    /// Compile every pattern so malformed ones surface before any value is checked.
    pub(crate) fn check(&self) -> Result<(), SchemaError> {
        for rule in &self.rules {
            if let RuleKind::Pattern(pattern) = &rule.kind {
                pattern.regex().map_err(|source| SchemaError::InvalidPattern {
                    field: self.name.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

/// Ordered collection of field specs.
#[derive(Debug, Default)]
pub struct ValidationSchema {
    fields: Vec<FieldSpec>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Fields are validated in the order they are added.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check the whole schema: unique field names and compilable patterns.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for spec in &self.fields {
            if !seen.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateField(spec.name.clone()));
            }
            spec.check()?;
        }
        Ok(())
    }
}
