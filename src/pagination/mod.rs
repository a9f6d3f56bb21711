//! Pagination module
//!
//! Walks the pages of a list in two phases:
//!
//! 1. Fetch page 1, which declares the total item count
//! 2. Walk the [`PagePlan`] for pages `2..=ceil(total / 250)`
//!
//! Pages are fetched one at a time, in order. Any page that does not come
//! back `200` aborts the whole retrieval.

mod controller;
mod types;

pub use controller::{FirstPage, ListRetriever};
pub use types::{
    list_url, page_count, start_offset, PagePlan, PagePlanIter, PageRequest, PAGE_SIZE,
};
