//! Creating and editing posts.

use once_cell::sync::Lazy;
use tracing::info;

use crate::error::Result;
use crate::rest::PostkitHttpClient;
use crate::session::Session;
use crate::types::{NewPost, Post, PostPatch};
use crate::validation::{validate_form, FieldSpec, ValidationResult, ValidationSchema};

pub const TITLE_BODY_REQUIRED: &str = "Both title and body are required";

static POST_SCHEMA: Lazy<ValidationSchema> = Lazy::new(|| {
    ValidationSchema::new()
        .field(FieldSpec::new("title").trim().required(TITLE_BODY_REQUIRED))
        .field(FieldSpec::new("body").trim().required(TITLE_BODY_REQUIRED))
});

/// Schema for the post editor (`title`, `body`).
pub fn post_schema() -> &'static ValidationSchema {
    &POST_SCHEMA
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeOutcome {
    /// The post as returned by the server.
    Saved(Post),
    Rejected(ValidationResult),
}

/// Create a post authored by the signed-in user.
pub async fn create_post(
    client: &PostkitHttpClient,
    session: &Session,
    title: &str,
    body: &str,
) -> Result<ComposeOutcome> {
    let checked = validate_form(post_schema(), &[("title", title), ("body", body)])?;
    if !checked.is_valid() {
        return Ok(ComposeOutcome::Rejected(checked));
    }

    let post = client
        .create_post(&NewPost {
            title: title.to_string(),
            body: body.to_string(),
            user_id: session.user_id,
        })
        .await?;
    info!(post_id = post.id, user_id = session.user_id, "post created");
    Ok(ComposeOutcome::Saved(post))
}

/// Replace the title and body of an existing post.
pub async fn edit_post(
    client: &PostkitHttpClient,
    post: &Post,
    title: &str,
    body: &str,
) -> Result<ComposeOutcome> {
    let checked = validate_form(post_schema(), &[("title", title), ("body", body)])?;
    if !checked.is_valid() {
        return Ok(ComposeOutcome::Rejected(checked));
    }

    let patch = PostPatch {
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        user_id: Some(post.user_id),
    };
    let updated = client.update_post(post.id, &patch).await?;
    info!(post_id = post.id, "post updated");
    Ok(ComposeOutcome::Saved(updated))
}
