//! Per-page state: placeholder tracking and the live page table.
//!
//! A page opened without a URL starts on the host's placeholder page. It
//! moves to `Navigated` on the first navigation away and stays there; a
//! reopened tab gets a new `PageId` instead of a reset.

use std::collections::HashMap;

use sg_core::types::{NavigationId, PageId};

/// URLs with this prefix are host-generated placeholder documents.
pub const PLACEHOLDER_DOCUMENT_PREFIX: &str = "data:text/html";

const BLANK_URL: &str = "about:blank";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderState {
    Placeholder,
    /// Terminal.
    Navigated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    page_id: PageId,
    state: PlaceholderState,
    injected_for: Option<NavigationId>,
}

impl PageContext {
    /// Pages opened without an explicit URL start as placeholders.
    pub fn new(page_id: PageId, initial_url: Option<&str>) -> Self {
        let state = match initial_url {
            None => PlaceholderState::Placeholder,
            Some(_) => PlaceholderState::Navigated,
        };

        Self {
            page_id,
            state,
            injected_for: None,
        }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn state(&self) -> PlaceholderState {
        self.state
    }

    pub fn is_placeholder(&self) -> bool {
        self.state == PlaceholderState::Placeholder
    }

    /// Navigation generation scripts were last inserted for.
    pub fn injected_for(&self) -> Option<NavigationId> {
        self.injected_for
    }

    /// `Placeholder -> Navigated`. Returns true only on the transition itself.
    pub fn resolve(&mut self) -> bool {
        match self.state {
            PlaceholderState::Placeholder => {
                self.state = PlaceholderState::Navigated;
                true
            }
            PlaceholderState::Navigated => false,
        }
    }

    /// Resolve when `url` is a committed URL outside the placeholder page.
    pub fn observe_committed_url(&mut self, url: &str, placeholder_url: &str) -> bool {
        if is_placeholder_document(url, placeholder_url) {
            return false;
        }
        self.resolve()
    }

    /// Claim `navigation` for injection. False when it was already claimed.
    pub fn claim_navigation(&mut self, navigation: NavigationId) -> bool {
        if self.injected_for == Some(navigation) {
            return false;
        }
        self.injected_for = Some(navigation);
        true
    }
}

/// Empty, blank, or the host's own placeholder document.
pub fn is_placeholder_document(url: &str, placeholder_url: &str) -> bool {
    let url = url.trim();
    url.is_empty()
        || url == BLANK_URL
        || url.starts_with(PLACEHOLDER_DOCUMENT_PREFIX)
        || (!placeholder_url.is_empty() && url.starts_with(placeholder_url))
}

/// Live pages by id. Closed pages are removed, so late events for them
/// resolve to `None`.
#[derive(Debug, Default)]
pub struct PageTable {
    pages: HashMap<PageId, PageContext>,
}

impl PageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. An id that is already live keeps its existing state.
    pub fn open(&mut self, page_id: PageId, initial_url: Option<&str>) -> &mut PageContext {
        self.pages
            .entry(page_id)
            .or_insert_with(|| PageContext::new(page_id, initial_url))
    }

    pub fn close(&mut self, page_id: PageId) -> Option<PageContext> {
        self.pages.remove(&page_id)
    }

    pub fn get(&self, page_id: PageId) -> Option<&PageContext> {
        self.pages.get(&page_id)
    }

    pub fn get_mut(&mut self, page_id: PageId) -> Option<&mut PageContext> {
        self.pages.get_mut(&page_id)
    }

    pub fn contains(&self, page_id: PageId) -> bool {
        self.pages.contains_key(&page_id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
