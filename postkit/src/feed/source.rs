use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::rest::PostkitHttpClient;
use crate::types::{FeedPage, Post};

/// A remote, ordered, page-addressable collection.
///
/// Implementations fetch exactly the requested page; they do not retry.
pub trait PageSource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    /// Fetch page `page.number` holding up to `page.size` items.
    fn fetch_page(&self, page: FeedPage) -> impl Future<Output = Result<Vec<Self::Item>>> + Send;
}

impl PageSource for PostkitHttpClient {
    type Item = Post;

    async fn fetch_page(&self, page: FeedPage) -> Result<Vec<Post>> {
        self.get_posts(page.number, page.size).await
    }
}

impl<S: PageSource> PageSource for Arc<S> {
    type Item = S::Item;

    fn fetch_page(&self, page: FeedPage) -> impl Future<Output = Result<Vec<Self::Item>>> + Send {
        (**self).fetch_page(page)
    }
}
