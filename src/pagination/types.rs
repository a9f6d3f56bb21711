//! Page arithmetic and URL building

use crate::types::{ListConfig, ListKind};

/// Items per list page, fixed by the site
pub const PAGE_SIZE: u64 = 250;

/// Number of pages needed to cover `total_count` items
pub fn page_count(total_count: u64) -> u64 {
    total_count.div_ceil(PAGE_SIZE)
}

/// 1-based `start` parameter for a 1-based page number
pub fn start_offset(page: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE).saturating_add(1)
}

/// URL of the first page of a list.
///
/// Reserved lists live under the user, anything else is a public list id.
pub fn list_url(site: &str, config: &ListConfig) -> String {
    let site = site.trim_end_matches('/');
    match config.kind() {
        ListKind::Reserved => format!(
            "{site}/user/{}/{}?view=compact",
            config.user_id, config.list
        ),
        ListKind::Custom => format!("{site}/list/{}?view=compact", config.list),
    }
}

/// One page request after the first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Value of the `start` query parameter
    pub start: u64,
    /// Full URL to fetch
    pub url: String,
}

/// Follow-up pages of a list, in page order.
///
/// Requests are built one at a time while iterating, so a huge declared
/// total costs nothing until its pages are actually fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePlan {
    base_url: String,
    last_page: u64,
}

impl PagePlan {
    /// Plan the follow-up pages for a list whose first page is at `base_url`
    pub fn new(base_url: &str, total_count: u64) -> Self {
        Self {
            base_url: base_url.to_string(),
            last_page: page_count(total_count),
        }
    }

    /// Last page to fetch, 0 for an empty list
    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    /// Number of follow-up pages
    pub fn len(&self) -> u64 {
        self.last_page.saturating_sub(1)
    }

    /// True when the first page covers the whole list
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Request for `page`
    pub fn request(&self, page: u64) -> PageRequest {
        let start = start_offset(page);
        PageRequest {
            page,
            start,
            url: format!("{}&start={start}", self.base_url),
        }
    }

    /// Requests for pages `2..=last_page`
    pub fn iter(&self) -> PagePlanIter<'_> {
        PagePlanIter {
            plan: self,
            pages: 2..=self.last_page,
        }
    }
}

/// Iterator over the requests of a [`PagePlan`]
#[derive(Debug, Clone)]
pub struct PagePlanIter<'a> {
    plan: &'a PagePlan,
    pages: std::ops::RangeInclusive<u64>,
}

impl Iterator for PagePlanIter<'_> {
    type Item = PageRequest;

    fn next(&mut self) -> Option<PageRequest> {
        self.pages.next().map(|page| self.plan.request(page))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}

impl<'a> IntoIterator for &'a PagePlan {
    type Item = PageRequest;
    type IntoIter = PagePlanIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
