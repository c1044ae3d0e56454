//! Pagination module
//!
//! Follows the opaque continuation token returned by list calls.
//!
//! # Overview
//!
//! A list call answers with one page of results plus a `nextPageToken`.
//! The token is fed back into the next request until it comes back empty.
//! `PaginationState` tracks the page number and the token between calls.

mod strategies;
mod types;

pub use strategies::PageTokenPaginator;
pub use types::{NextPage, PaginationState};
