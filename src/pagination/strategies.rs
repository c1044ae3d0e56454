//! Pagination strategy implementations

use super::types::{NextPage, PaginationState};
use crate::types::OptionStringExt;

/// Token-based pagination (`pageToken` / `nextPageToken`)
///
/// An empty or missing `nextPageToken` ends the listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTokenPaginator;

impl PageTokenPaginator {
    /// Create a new token paginator
    pub fn new() -> Self {
        Self
    }

    /// Record a received page and decide whether another one follows
    pub fn process_page(
        &self,
        next_page_token: Option<String>,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.next_page();
        state.add_fetched(items_count as u64);

        match next_page_token.none_if_empty() {
            Some(token) => {
                state.set_token(token.clone());
                NextPage::with_token(token)
            }
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}
