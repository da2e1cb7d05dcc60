//! Catalog query engine: debounced search, tag filters, pagination.
//!
//! Every mutator funnels into one request path that stamps each outgoing
//! query with a monotonically increasing sequence number; a response is
//! applied only while its sequence is still the newest issued. A slow early
//! response can therefore never overwrite the results of a later query, no
//! matter how the network reorders completions.
//!
//! Debounce applies to search text only. Tag toggles, pagination, and
//! explicit refreshes query immediately.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use termshop_api::ApiClient;
use termshop_core::{tag_vocabulary, Product};
use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::lock;
use crate::toast::{Severity, ToastQueue};

/// Rows per catalog page.
pub const PAGE_SIZE: u32 = 5;

/// Idle window after the last keystroke before a search query is issued.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// The filter state queries are built from.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub search_term: String,
    /// Active tag filters; ordered so the wire encoding is deterministic.
    pub active_tags: BTreeSet<String>,
    /// Current page, 1-based. Always at least 1.
    pub page: u32,
    /// Total rows matching the filters, from the last applied response.
    pub total_count: u64,
}

impl QueryState {
    fn new() -> Self {
        Self {
            search_term: String::new(),
            active_tags: BTreeSet::new(),
            page: 1,
            total_count: 0,
        }
    }

    /// Number of pages for the current total; zero when nothing matches.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(PAGE_SIZE));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Rows to skip so the window starts at the current page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(PAGE_SIZE)
    }

    fn q_param(&self) -> Option<String> {
        if self.search_term.is_empty() {
            None
        } else {
            Some(self.search_term.clone())
        }
    }

    fn tags_param(&self) -> Option<String> {
        if self.active_tags.is_empty() {
            None
        } else {
            Some(
                self.active_tags
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            )
        }
    }
}

/// Everything a catalog screen needs to render one frame.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub products: Vec<Product>,
    /// Tag menu built from the products currently on screen.
    pub tag_menu: Vec<String>,
    pub query: QueryState,
}

/// Shared catalog engine handle. Cloning is cheap; all clones drive the
/// same state.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    toasts: ToastQueue,
    window: Duration,
    state: Mutex<State>,
    debounce: Debouncer,
    issued: AtomicU64,
    applied_tx: watch::Sender<u64>,
}

#[derive(Debug)]
struct State {
    query: QueryState,
    products: Vec<Product>,
    tag_menu: Vec<String>,
}

impl CatalogEngine {
    #[must_use]
    pub fn new(api: ApiClient, toasts: ToastQueue) -> Self {
        Self::with_window(api, toasts, DEBOUNCE_WINDOW)
    }

    /// Engine with a custom debounce window. Used by tests to tighten
    /// timing.
    #[must_use]
    pub fn with_window(api: ApiClient, toasts: ToastQueue, window: Duration) -> Self {
        let (applied_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                api,
                toasts,
                window,
                state: Mutex::new(State {
                    query: QueryState::new(),
                    products: Vec::new(),
                    tag_menu: Vec::new(),
                }),
                debounce: Debouncer::new(),
                issued: AtomicU64::new(0),
                applied_tx,
            }),
        }
    }

    /// Replaces the search text, resets to page 1, and restarts the
    /// debounce window.
    ///
    /// Only the pending timer restarts. A query already on the wire runs to
    /// completion and is discarded by the sequence check if it lands after a
    /// newer one was issued.
    pub fn search(&self, term: &str) {
        {
            let mut state = lock(&self.inner.state);
            state.query.search_term = term.to_owned();
            state.query.page = 1;
        }
        let engine = self.clone();
        self.inner.debounce.schedule(self.inner.window, async move {
            engine.issue().await;
        });
    }

    /// Toggles `tag` in the active set, resets to page 1, and queries
    /// immediately.
    pub async fn toggle_tag(&self, tag: &str) {
        {
            let mut state = lock(&self.inner.state);
            let tags = &mut state.query.active_tags;
            if !tags.remove(tag) {
                tags.insert(tag.to_owned());
            }
            state.query.page = 1;
        }
        self.issue().await;
    }

    /// Clears every active tag, resets to page 1, and queries immediately.
    pub async fn clear_tags(&self) {
        {
            let mut state = lock(&self.inner.state);
            state.query.active_tags.clear();
            state.query.page = 1;
        }
        self.issue().await;
    }

    /// Jumps to `page` and queries immediately. Page 0, the current page,
    /// and targets beyond the last page are ignored without a request.
    pub async fn go_to_page(&self, page: u32) {
        {
            let mut state = lock(&self.inner.state);
            let query = &mut state.query;
            if page == 0 || page == query.page || page > query.total_pages() {
                return;
            }
            query.page = page;
        }
        self.issue().await;
    }

    /// Queries with the current filters, bypassing the debounce window.
    pub async fn refresh(&self) {
        self.issue().await;
    }

    /// A consistent copy of the current results and filters.
    #[must_use]
    pub fn snapshot(&self) -> CatalogView {
        let state = lock(&self.inner.state);
        CatalogView {
            products: state.products.clone(),
            tag_menu: state.tag_menu.clone(),
            query: state.query.clone(),
        }
    }

    /// Subscribes to applied results. The value is the sequence number of
    /// the most recently applied query; await `changed` to observe the next
    /// settle (including debounced searches).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.applied_tx.subscribe()
    }

    async fn issue(&self) {
        let seq = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let (skip, q, tags) = {
            let state = lock(&self.inner.state);
            (
                state.query.skip(),
                state.query.q_param(),
                state.query.tags_param(),
            )
        };

        tracing::debug!(seq, skip, q = q.as_deref(), tags = tags.as_deref(), "catalog query");
        let result = self
            .inner
            .api
            .list_products(skip, PAGE_SIZE, q.as_deref(), tags.as_deref())
            .await;

        let mut state = lock(&self.inner.state);
        if seq != self.inner.issued.load(Ordering::SeqCst) {
            tracing::debug!(seq, "discarding stale catalog response");
            return;
        }
        match result {
            Ok(page) => {
                state.query.total_count = page.count;
                // The total can shrink under us; snap the page back into
                // range so the next navigation starts from a real page.
                let total_pages = state.query.total_pages();
                if total_pages > 0 && state.query.page > total_pages {
                    state.query.page = total_pages;
                }
                state.tag_menu = tag_vocabulary(&page.data);
                state.products = page.data;
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog query failed");
                state.products.clear();
                state.tag_menu.clear();
                state.query.total_count = 0;
                self.inner
                    .toasts
                    .post("Failed to load products", Severity::Error);
            }
        }
        drop(state);
        self.inner.applied_tx.send_replace(seq);
    }
}
