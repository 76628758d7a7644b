use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::rest::PostkitHttpClient;
use crate::types::{Post, User};

/// A user together with the posts they wrote.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user: User,
    pub posts: Vec<Post>,
}

impl Profile {
    pub fn initials(&self) -> String {
        self.user.initials()
    }
}

/// Fetch a user and their posts.
///
/// # Errors
///
/// Returns [`PostkitError::UserNotFound`](crate::PostkitError::UserNotFound)
/// when the backend has no such user.
pub async fn load_profile(client: &PostkitHttpClient, user_id: u32) -> Result<Profile> {
    let user = client.get_user(user_id).await?;
    let posts: Vec<Post> = client
        .get_user_posts(user_id)
        .await?
        .into_iter()
        .filter(|p| p.user_id == user_id)
        .collect();
    debug!(user_id, posts = posts.len(), "profile loaded");
    Ok(Profile { user, posts })
}
