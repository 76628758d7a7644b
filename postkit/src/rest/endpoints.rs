use crate::error::{PostkitError, Result};
use crate::rest::PostkitHttpClient;
use crate::types::*;

impl PostkitHttpClient {
    // --- Users ---

    /// GET /users - All users.
    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.get("/users", &[]).await
    }

    /// GET /users/{id} - A single user.
    pub async fn get_user(&self, id: u32) -> Result<User> {
        self.get(&format!("/users/{id}"), &[])
            .await
            .map_err(|e| not_found_as(e, PostkitError::UserNotFound(id)))
    }

    /// GET /users on the search backend - Users with avatars and extra detail.
    pub async fn get_rich_users(&self) -> Result<Vec<User>> {
        let list: SearchUserList = self.get_search("/users", &[]).await?;
        Ok(list.users.into_iter().map(User::from).collect())
    }

    // --- Posts ---

    /// GET /posts?_page=&_limit= - One page of the post feed.
    pub async fn get_posts(&self, page: u32, limit: u32) -> Result<Vec<Post>> {
        self.get(
            "/posts",
            &[("_page", &page.to_string()), ("_limit", &limit.to_string())],
        )
        .await
    }

    /// GET /posts?userId= - Posts written by one user.
    pub async fn get_user_posts(&self, user_id: u32) -> Result<Vec<Post>> {
        self.get("/posts", &[("userId", &user_id.to_string())])
            .await
    }

    /// GET /posts/{id} - A single post.
    pub async fn get_post(&self, id: u32) -> Result<Post> {
        self.get(&format!("/posts/{id}"), &[])
            .await
            .map_err(|e| not_found_as(e, PostkitError::PostNotFound(id)))
    }

    /// POST /posts - Create a post; the server echoes it back with an ID.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.post_json("/posts", post).await
    }

    /// PUT /posts/{id} - Update a post.
    pub async fn update_post(&self, id: u32, patch: &PostPatch) -> Result<Post> {
        self.put_json(&format!("/posts/{id}"), patch)
            .await
            .map_err(|e| not_found_as(e, PostkitError::PostNotFound(id)))
    }

    /// DELETE /posts/{id} - Delete a post.
    pub async fn delete_post(&self, id: u32) -> Result<()> {
        self.delete(&format!("/posts/{id}")).await
    }

    /// GET /posts/search?q= on the search backend - Full-text post search.
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        let results: PostSearchResults = self.get_search("/posts/search", &[("q", query)]).await?;
        Ok(results.posts)
    }

    // --- Comments ---

    /// GET /comments[?postId=] - Comments, optionally for a single post.
    pub async fn get_comments(&self, post_id: Option<u32>) -> Result<Vec<Comment>> {
        match post_id {
            Some(id) => self.get("/comments", &[("postId", &id.to_string())]).await,
            None => self.get("/comments", &[]).await,
        }
    }
}

/// Map a 404 onto a typed not-found error, passing anything else through.
fn not_found_as(err: PostkitError, not_found: PostkitError) -> PostkitError {
    match err {
        PostkitError::Http { status: 404, .. } => not_found,
        other => other,
    }
}
