//! Sign-in against the mock backend.
//!
//! The backend has no credential check: a user is "authenticated" when the
//! form passes validation and the email belongs to a known user.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::rest::PostkitHttpClient;
use crate::validation::{login_schema, validate_form, ValidationResult};

/// Token handed out for every successful sign-in; the mock API ignores it.
pub const PLACEHOLDER_TOKEN: &str = "temp-token";

pub const EMAIL_NOT_FOUND: &str = "Email not found";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub name: String,
    pub user_id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// Per-field messages to show next to the form inputs.
    Rejected(ValidationResult),
}

/// Validate the credentials, then look the email up among the backend's users.
///
/// # Errors
///
/// Returns [`PostkitError`](crate::PostkitError) if the user listing cannot be
/// fetched. Bad input and unknown emails are reported as
/// [`LoginOutcome::Rejected`], not as errors.
pub async fn login(client: &PostkitHttpClient, email: &str, password: &str) -> Result<LoginOutcome> {
    let checked = validate_form(login_schema(), &[("email", email), ("password", password)])?;
    if !checked.is_valid() {
        debug!(fields = ?checked.errors().keys().collect::<Vec<_>>(), "login form rejected");
        return Ok(LoginOutcome::Rejected(checked));
    }

    let users = client.get_users().await?;
    let Some(user) = users.into_iter().find(|u| u.has_email(email)) else {
        info!("login rejected: unknown email");
        return Ok(LoginOutcome::Rejected(ValidationResult::with_error(
            "email",
            EMAIL_NOT_FOUND,
        )));
    };

    info!(user_id = user.id, name = %user.name, "signed in");
    Ok(LoginOutcome::Authenticated(Session {
        token: PLACEHOLDER_TOKEN.to_string(),
        name: user.name,
        user_id: user.id,
    }))
}
