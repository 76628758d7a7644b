//! Paginated feed loading.

pub mod loader;
pub mod source;

pub use loader::{FeedLoader, FeedState, LoadOutcome, LoaderOptions, LoaderPhase};
pub use source::PageSource;
