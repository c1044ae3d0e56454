//! Pagination types
//!
//! Defines the page-tracking state shared by the fetch loop.

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available behind this token
    Continue {
        /// Token to send with the next request
        page_token: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::Continue {
            page_token: token.into(),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Pagination state tracked across list calls
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Number of pages received so far (the current page number, 1-based)
    pub page: u32,
    /// Token for the next request, if any
    pub page_token: Option<String>,
    /// Total items received across pages
    pub total_fetched: u64,
    /// Whether pagination is complete
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
        self.page_token = None;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Set the token for the next request
    pub fn set_token(&mut self, token: String) {
        self.page_token = Some(token);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}
