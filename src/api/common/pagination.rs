//
//  gitlab-state
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pagination Helpers for GitLab API Responses
//!
//! GitLab paginates list endpoints with `page` and `per_page` query
//! parameters. Unlike cursor-based APIs there is no "next" link to follow:
//! the client requests `page=1,2,3,...` and stops as soon as a page comes
//! back with fewer entries than requested (or no entries at all).
//!
//! # Overview
//!
//! [`Pager`] is a small cursor that tracks the current page number and
//! whether the enumeration is finished. The HTTP client drives it:
//!
//! 1. Build a `Pager` for a path and page size
//! 2. Request [`Pager::query()`](Pager::query)
//! 3. Feed the returned batch length into [`Pager::advance()`](Pager::advance)
//! 4. Repeat until [`Pager::is_done()`](Pager::is_done)
//!
//! # Example
//!
//! ```rust
//! use gitlab_state::api::common::Pager;
//!
//! let mut pager = Pager::new("/projects/all", 1000);
//! assert_eq!(pager.query(), "/projects/all?page=1&per_page=1000");
//!
//! // A full page means there may be more.
//! pager.advance(1000);
//! assert!(!pager.is_done());
//! assert_eq!(pager.query(), "/projects/all?page=2&per_page=1000");
//!
//! // A short page terminates the enumeration.
//! pager.advance(500);
//! assert!(pager.is_done());
//! ```
//!
//! # Notes
//!
//! - Page numbers are 1-indexed, matching the GitLab API
//! - A fresh `Pager` always restarts from page 1, so the produced sequence
//!   is restartable by constructing a new cursor
//! - A final page of exactly `per_page` entries costs one extra (empty)
//!   round trip; that is the trade for not trusting total-count headers

/// Default number of entries requested per page.
///
/// Large on purpose: natural-key lookups enumerate the full collection, so
/// fewer round trips beat smaller payloads here. Overridable per client via
/// [`Settings::per_page`](crate::config::Settings) or the `GITLAB_PER_PAGE`
/// environment variable.
pub const DEFAULT_PER_PAGE: u32 = 1000;

/// Page-number pagination cursor for GitLab list endpoints.
///
/// Tracks which page to request next and whether the previous response
/// already proved the enumeration complete. The cursor owns no HTTP state;
/// the client performs the requests and reports batch sizes back.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `path` | API path being enumerated (without query string) |
/// | `per_page` | Page size requested from the remote |
/// | `page` | Next page number to request (1-indexed) |
/// | `done` | Whether a short or empty page has been observed |
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::common::Pager;
///
/// let mut pager = Pager::new("/groups", 100);
/// let mut total = 0;
/// while !pager.is_done() {
///     // let batch: Vec<Group> = client.get(&pager.query()).await?;
///     let batch_len = 40; // last page in this example
///     total += batch_len;
///     pager.advance(batch_len);
/// }
/// assert_eq!(total, 40);
/// ```
#[derive(Debug, Clone)]
pub struct Pager {
    /// API path being enumerated, without a query string.
    path: String,

    /// Number of entries requested per page.
    per_page: u32,

    /// Next page number to request (1-indexed).
    page: u32,

    /// Set once a page returned fewer than `per_page` entries.
    done: bool,
}

impl Pager {
    /// Creates a cursor for `path`, starting at page 1.
    ///
    /// # Parameters
    ///
    /// * `path` - The API path to enumerate (e.g., `"/projects/all"`)
    /// * `per_page` - Page size to request; values of 0 are clamped to 1
    pub fn new(path: impl Into<String>, per_page: u32) -> Self {
        Self {
            path: path.into(),
            per_page: per_page.max(1),
            page: 1,
            done: false,
        }
    }

    /// Returns the path-with-query for the next page request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gitlab_state::api::common::Pager;
    ///
    /// let pager = Pager::new("/projects/all", 50);
    /// assert_eq!(pager.query(), "/projects/all?page=1&per_page=50");
    /// ```
    pub fn query(&self) -> String {
        format!("{}?page={}&per_page={}", self.path, self.page, self.per_page)
    }

    /// Records the size of the batch just fetched and moves the cursor.
    ///
    /// A batch shorter than the requested page size (including an empty
    /// batch) terminates the enumeration; a full batch advances to the
    /// next page number.
    ///
    /// # Parameters
    ///
    /// * `batch_len` - Number of entries the remote returned for the
    ///   current page
    pub fn advance(&mut self, batch_len: usize) {
        if batch_len < self.per_page as usize {
            self.done = true;
        } else {
            self.page += 1;
        }
    }

    /// Checks whether the enumeration is complete.
    ///
    /// # Returns
    ///
    /// Returns `true` once a short or empty page has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the next page number that would be requested (1-indexed).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size this cursor requests.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_format() {
        let pager = Pager::new("/projects/all", 1000);
        assert_eq!(pager.query(), "/projects/all?page=1&per_page=1000");
    }

    #[test]
    fn test_full_pages_then_short_page() {
        let mut pager = Pager::new("/projects/all", 1000);
        pager.advance(1000);
        assert!(!pager.is_done());
        assert_eq!(pager.page(), 2);
        pager.advance(1000);
        assert!(!pager.is_done());
        assert_eq!(pager.page(), 3);
        pager.advance(500);
        assert!(pager.is_done());
    }

    #[test]
    fn test_empty_first_page_terminates() {
        let mut pager = Pager::new("/groups", 100);
        pager.advance(0);
        assert!(pager.is_done());
    }

    #[test]
    fn test_zero_per_page_is_clamped() {
        let mut pager = Pager::new("/groups", 0);
        assert_eq!(pager.per_page(), 1);
        pager.advance(1);
        assert!(!pager.is_done());
        pager.advance(0);
        assert!(pager.is_done());
    }
}
