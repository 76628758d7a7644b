//! Form validation: declarative schemas, the interpreter that runs them, the
//! login schema, and the advisory password strength meter.

pub mod engine;
pub mod login;
pub mod schema;
pub mod strength;

use thiserror::Error;

pub use engine::{validate_field, validate_form, FieldValues, ValidationResult};
pub use login::login_schema;
pub use schema::{FieldRule, FieldSpec, Pattern, Predicate, RuleKind, ValidationSchema};
pub use strength::{score_password_strength, PasswordStrength, StrengthLabel};

/// A mistake in a schema itself rather than in the values being checked.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field declared twice: {0}")]
    DuplicateField(String),

    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}
