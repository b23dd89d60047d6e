//! Identifier-level navigation over the currently loaded page of cases.
//!
//! The navigator lets a detail view step to the previous/next case of the
//! loaded page without refetching, and records the page's cursor tokens so
//! the data source can re-fetch past the page boundary. It is rebuilt
//! wholesale on every page fetch and never merges across pages.
//!
//! Ownership: the data source exclusively drives updates; other consumers
//! only call the read-oriented traversal operations.

mod linked_list;

use linked_list::CaseList;

/// The default number of cases per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The page size options offered by the case list paginator.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 25, 50, 100, 250];

/// Opaque pagination cursor tokens issued by the backend.
///
/// Tokens are meaningless to the client beyond round-tripping them back
/// to the fetch operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorTokens {
    /// Token for re-fetching the page before the current one.
    pub previous: Option<String>,
    /// Token for fetching the page after the current one.
    pub next: Option<String>,
}

impl CursorTokens {
    /// Clears both tokens.
    pub fn clear(&mut self) {
        self.previous = None;
        self.next = None;
    }
}

/// Navigation state over one loaded page of cases.
///
/// Owns a doubly-linked list of the page's case identifiers, the
/// paginator's last-known page index and size, and two cursor-token
/// pairs: `current_tokens` (from the latest fetch) and `last_tokens`
/// (for the page actually committed to, used to reproduce it on
/// refresh). The navigator never interprets the tokens itself.
#[derive(Debug)]
pub struct CaseNavigator {
    list: CaseList,
    /// Page index the paginator last committed to.
    pub current_page_index: usize,
    /// Page size the paginator last committed to.
    pub current_page_size: usize,
    /// Tokens received from the latest fetch.
    pub current_tokens: CursorTokens,
    /// Tokens associated with the page actually committed to.
    pub last_tokens: CursorTokens,
}

impl Default for CaseNavigator {
    fn default() -> Self {
        Self {
            list: CaseList::default(),
            current_page_index: 0,
            current_page_size: DEFAULT_PAGE_SIZE,
            current_tokens: CursorTokens::default(),
            last_tokens: CursorTokens::default(),
        }
    }
}

impl CaseNavigator {
    /// Creates a navigator with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the loaded page's identifiers.
    pub fn reset(&mut self) {
        self.list.reset();
    }

    /// Appends a case identifier to the loaded page.
    ///
    /// Identifiers are added in page order, once per rebuild.
    pub fn add(&mut self, case_id: &str) {
        self.list.add(case_id);
    }

    /// The identifier of the case before `case_id` in the loaded page,
    /// or `None` at the page boundary or for an unknown identifier.
    pub fn previous(&mut self, case_id: &str) -> Option<String> {
        self.list.previous(case_id)
    }

    /// The identifier of the case after `case_id` in the loaded page,
    /// or `None` at the page boundary or for an unknown identifier.
    pub fn next(&mut self, case_id: &str) -> Option<String> {
        self.list.next(case_id)
    }

    /// Removes a case identifier from the loaded page.
    pub fn remove(&mut self, case_id: &str) {
        self.list.remove(case_id);
    }

    /// The identifiers currently visible, in page order.
    ///
    /// Used by bulk-action review flows.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        self.list.ids()
    }

    /// Number of identifiers in the loaded page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether no page is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_replaces_the_page() {
        let mut navigator = CaseNavigator::new();
        navigator.add("a");
        navigator.add("b");

        navigator.reset();
        navigator.add("x");
        navigator.add("y");

        assert_eq!(navigator.visible_ids(), vec!["x", "y"]);
        assert_eq!(navigator.next("a"), None);
        assert_eq!(navigator.next("x").as_deref(), Some("y"));
    }

    #[test]
    fn defaults_match_the_paginator() {
        let navigator = CaseNavigator::new();
        assert_eq!(navigator.current_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(navigator.current_page_index, 0);
        assert!(navigator.current_tokens.previous.is_none());
        assert!(navigator.current_tokens.next.is_none());
        assert!(navigator.is_empty());
    }

    #[test]
    fn tokens_clear() {
        let mut tokens = CursorTokens {
            previous: Some("p".to_string()),
            next: Some("n".to_string()),
        };
        tokens.clear();
        assert_eq!(tokens, CursorTokens::default());
    }
}
