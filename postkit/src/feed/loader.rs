//! Incremental page loader backing an infinite-scroll feed.
//!
//! State lives in a `watch` channel: the loader mutates it synchronously just
//! before and just after the single awaited fetch, and observers receive every
//! transition through [`FeedLoader::subscribe`]. The phase guard, not a lock
//! held across the await, keeps at most one fetch in flight per loader.

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::types::FeedPage;

use super::source::PageSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Ready to fetch `next_page`.
    Idle,
    /// One fetch is in flight.
    Loading,
    /// The collection has no further pages. Only `reset` leaves this phase.
    Exhausted,
}

/// Observable snapshot of a loader.
#[derive(Debug, Clone)]
pub struct FeedState<T> {
    items: Vec<T>,
    next_page: u32,
    phase: LoaderPhase,
    generation: u64,
    closed: bool,
}

impl<T> FeedState<T> {
    fn new(first_page: u32) -> Self {
        Self {
            items: Vec::new(),
            next_page: first_page,
            phase: LoaderPhase::Idle,
            generation: 0,
            closed: false,
        }
    }

    /// Items received so far, in arrival order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The page number the next fetch will request.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoaderPhase::Loading
    }

    pub fn has_more(&self) -> bool {
        self.phase != LoaderPhase::Exhausted
    }

    /// Whether the owning view has released the loader.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Loader tuning.
#[derive(Debug, Clone, Copy)]
pub struct LoaderOptions {
    /// Page number requested first and restored by `reset`.
    pub first_page: u32,
    /// Items requested per page.
    pub page_size: u32,
    /// Treat a non-empty page shorter than `page_size` as the last one.
    pub stop_on_short_page: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            first_page: 1,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            stop_on_short_page: false,
        }
    }
}

/// What a call to [`FeedLoader::load_next`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived and this many items were appended.
    Appended(usize),
    /// An empty page arrived; the loader is now exhausted.
    Exhausted,
    /// No request was made: a fetch was already in flight, the feed is
    /// exhausted, or the loader is closed.
    Skipped,
    /// The response arrived after a `reset` or `close` and was dropped.
    Discarded,
}

/// Sequential, page-based loader over a [`PageSource`].
pub struct FeedLoader<S: PageSource> {
    source: S,
    options: LoaderOptions,
    state: watch::Sender<FeedState<S::Item>>,
}

impl<S: PageSource> FeedLoader<S> {
    pub fn new(source: S, options: LoaderOptions) -> Self {
        let options = LoaderOptions {
            page_size: options.page_size.max(1),
            ..options
        };
        let (state, _) = watch::channel(FeedState::new(options.first_page));
        Self {
            source,
            options,
            state,
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FeedState<S::Item>> {
        self.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> FeedState<S::Item> {
        self.state.borrow().clone()
    }

    /// Run `f` against the current state without cloning the items.
    pub fn with_state<R>(&self, f: impl FnOnce(&FeedState<S::Item>) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Fetch the next page if the loader is idle.
    ///
    /// While a fetch is in flight, after exhaustion, or once closed, this
    /// returns [`LoadOutcome::Skipped`] without touching the source.
    ///
    /// # Errors
    ///
    /// Returns the source's error when the fetch fails. The loader goes back
    /// to idle with the page cursor unchanged, so the next call asks for the
    /// same page again. Nothing is retried automatically.
    pub async fn load_next(&self) -> Result<LoadOutcome> {
        let mut ticket = None;
        self.state.send_if_modified(|s| {
            if s.closed || s.phase != LoaderPhase::Idle {
                return false;
            }
            s.phase = LoaderPhase::Loading;
            ticket = Some((FeedPage::new(s.next_page, self.options.page_size), s.generation));
            true
        });
        let Some((page, generation)) = ticket else {
            trace!("load_next skipped");
            return Ok(LoadOutcome::Skipped);
        };

        debug!(page = page.number, size = page.size, "fetching page");
        let guard = FetchGuard {
            state: &self.state,
            generation,
            armed: true,
        };
        let fetched = self.source.fetch_page(page).await;
        guard.disarm();

        let items = match fetched {
            Ok(items) => items,
            Err(err) => {
                let current = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.phase = LoaderPhase::Idle;
                    true
                });
                if !current {
                    warn!(page = page.number, error = %err, "discarding failure from stale fetch");
                    return Ok(LoadOutcome::Discarded);
                }
                debug!(page = page.number, error = %err, "page fetch failed");
                return Err(err);
            }
        };

        let received = items.len();
        let stop_on_short_page = self.options.stop_on_short_page;
        let mut outcome = LoadOutcome::Discarded;
        self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            if received == 0 {
                s.phase = LoaderPhase::Exhausted;
                outcome = LoadOutcome::Exhausted;
                return true;
            }
            s.items.extend(items);
            s.next_page += 1;
            s.phase = if stop_on_short_page && !page.is_full(received) {
                LoaderPhase::Exhausted
            } else {
                LoaderPhase::Idle
            };
            outcome = LoadOutcome::Appended(received);
            true
        });

        match outcome {
            LoadOutcome::Discarded => {
                warn!(page = page.number, received, "discarding response from stale fetch")
            }
            LoadOutcome::Exhausted => debug!(page = page.number, "feed exhausted"),
            _ => debug!(page = page.number, received, "page appended"),
        }
        Ok(outcome)
    }

    /// Drop all items and start over from the first page.
    ///
    /// A fetch still in flight is not cancelled; its response is discarded.
    /// The loader is idle right away, so a `load_next` issued before that
    /// stale fetch returns starts a second request for the first page.
    pub fn reset(&self) {
        let first_page = self.options.first_page;
        self.state.send_modify(|s| {
            s.items.clear();
            s.next_page = first_page;
            s.phase = LoaderPhase::Idle;
            s.generation += 1;
        });
        debug!(first_page, "feed reset");
    }

    /// Release the loader: later calls are skipped and any in-flight
    /// response is discarded.
    pub fn close(&self) {
        self.state.send_modify(|s| {
            s.closed = true;
            s.generation += 1;
            if s.phase == LoaderPhase::Loading {
                s.phase = LoaderPhase::Idle;
            }
        });
    }
}

/// Puts a loader back to idle when a `load_next` future is dropped mid-fetch.
///
/// Only applies while the generation it was taken under is still current.
struct FetchGuard<'a, T> {
    state: &'a watch::Sender<FeedState<T>>,
    generation: u64,
    armed: bool,
}

impl<T> FetchGuard<'_, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for FetchGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let generation = self.generation;
        let released = self.state.send_if_modified(|s| {
            if s.generation != generation || s.phase != LoaderPhase::Loading {
                return false;
            }
            s.phase = LoaderPhase::Idle;
            true
        });
        if released {
            debug!("fetch abandoned, loader idle again");
        }
    }
}
