//! Login form schema and the character-class checks it shares with the
//! strength meter.

use once_cell::sync::Lazy;

use super::schema::{FieldSpec, ValidationSchema};

/// Characters accepted as "special" in passwords.
pub const SPECIAL_CHARS: &str = "@$!%*#?&";

/// Browser-style email syntax check (local part, `@`, dotted host labels).
const BASIC_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// Stricter `local@domain.tld` check requiring a dotted domain and a 2+ letter TLD.
const EMAIL_FORMAT_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub mod messages {
    pub const EMAIL_REQUIRED: &str = "Email address is required";
    pub const EMAIL_INVALID: &str = "Please enter a valid email address";
    pub const EMAIL_FORMAT: &str = "Email must be in a valid format (e.g., user@example.com)";

    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const PASSWORD_MIN: &str = "Password must be at least 6 characters long";
    pub const PASSWORD_FORMAT: &str = "Password must contain at least one letter and one number";
    pub const PASSWORD_UPPERCASE: &str = "Password must contain at least one uppercase letter";
    pub const PASSWORD_LOWERCASE: &str = "Password must contain at least one lowercase letter";
    pub const PASSWORD_NUMBER: &str = "Password must contain at least one number";
    pub const PASSWORD_SPECIAL: &str = "Password must contain at least one special character";
}

static LOGIN_SCHEMA: Lazy<ValidationSchema> = Lazy::new(|| {
    ValidationSchema::new()
        .field(
            FieldSpec::new("email")
                .trim()
                .required(messages::EMAIL_REQUIRED)
                .pattern(BASIC_EMAIL_PATTERN, messages::EMAIL_INVALID)
                .pattern(EMAIL_FORMAT_PATTERN, messages::EMAIL_FORMAT),
        )
        .field(
            FieldSpec::new("password")
                .required(messages::PASSWORD_REQUIRED)
                .min_length(6, messages::PASSWORD_MIN)
                .custom(is_letter_digit_password, messages::PASSWORD_FORMAT)
                .custom(has_uppercase, messages::PASSWORD_UPPERCASE)
                .custom(has_lowercase, messages::PASSWORD_LOWERCASE)
                .custom(has_digit, messages::PASSWORD_NUMBER)
                .custom(has_special, messages::PASSWORD_SPECIAL),
        )
});

/// The schema applied to the sign-in form (`email`, `password`).
pub fn login_schema() -> &'static ValidationSchema {
    &LOGIN_SCHEMA
}

pub fn has_lowercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_uppercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

pub fn has_special(value: &str) -> bool {
    value.chars().any(|c| SPECIAL_CHARS.contains(c))
}

/// At least one letter and one digit, and nothing outside letters, digits
/// and [`SPECIAL_CHARS`].
fn is_letter_digit_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SPECIAL_CHARS.contains(c));
    allowed && value.chars().any(|c| c.is_ascii_alphabetic()) && has_digit(value)
}
