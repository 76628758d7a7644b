use crate::compose::{self, ComposeOutcome};
use crate::config::PostkitConfig;
use crate::error::Result;
use crate::feed::{FeedLoader, LoaderOptions};
use crate::profile::{self, Profile};
use crate::rest::PostkitHttpClient;
use crate::session::{self, LoginOutcome, Session};
use crate::types::*;

/// Main client: configuration plus the REST client, with the app-level
/// flows (sign-in, feed, profile, post editing) on top.
#[derive(Debug, Clone)]
pub struct Postkit {
    /// Configuration this client was built from.
    pub config: PostkitConfig,
    /// HTTP client.
    pub http_client: PostkitHttpClient,
}

impl Postkit {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Fails if the configured URLs do not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: PostkitConfig) -> Result<Self> {
        let http_client = PostkitHttpClient::from_config(&config)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// A fresh feed loader over the post collection, one per view.
    pub fn feed_loader(&self) -> FeedLoader<PostkitHttpClient> {
        FeedLoader::new(
            self.http_client.clone(),
            LoaderOptions {
                page_size: self.config.effective_page_size(),
                ..Default::default()
            },
        )
    }

    // --- Flows ---

    /// Sign in with an email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        session::login(&self.http_client, email, password).await
    }

    /// Load a user's profile and posts.
    pub async fn load_profile(&self, user_id: u32) -> Result<Profile> {
        profile::load_profile(&self.http_client, user_id).await
    }

    /// Validate and create a post for the signed-in user.
    pub async fn create_post(
        &self,
        session: &Session,
        title: &str,
        body: &str,
    ) -> Result<ComposeOutcome> {
        compose::create_post(&self.http_client, session, title, body).await
    }

    /// Validate and apply an edit to an existing post.
    pub async fn edit_post(&self, post: &Post, title: &str, body: &str) -> Result<ComposeOutcome> {
        compose::edit_post(&self.http_client, post, title, body).await
    }

    // --- REST delegates ---

    /// Get a single post.
    pub async fn get_post(&self, id: u32) -> Result<Post> {
        self.http_client.get_post(id).await
    }

    /// Delete a post.
    pub async fn delete_post(&self, id: u32) -> Result<()> {
        self.http_client.delete_post(id).await
    }

    /// Search posts by free text.
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        self.http_client.search_posts(query).await
    }

    /// Comments, optionally for one post.
    pub async fn get_comments(&self, post_id: Option<u32>) -> Result<Vec<Comment>> {
        self.http_client.get_comments(post_id).await
    }

    /// Users from the richer search backend listing.
    pub async fn get_rich_users(&self) -> Result<Vec<User>> {
        self.http_client.get_rich_users().await
    }
}
