use serde::{Deserialize, Serialize};

/// One page request against a paged collection.
///
/// Page numbers are one-indexed on the posts backend (`_page=1` is the first
/// page); `size` is the requested item count and always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    pub number: u32,
    pub size: u32,
}

impl FeedPage {
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number,
            size: size.max(1),
        }
    }

    /// Whether a response of `received` items filled the page.
    pub fn is_full(&self, received: usize) -> bool {
        received >= self.size as usize
    }
}
