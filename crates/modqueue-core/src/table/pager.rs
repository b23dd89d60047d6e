//! The injected paged-fetch contract consumed by the table source.

use thiserror::Error;

use crate::case::Case;

/// Fallback message when a fetch failure carries no description.
pub const DEFAULT_ERROR_MSG: &str = "An unknown error occurred.";

/// A request for one page of cases.
///
/// At most one of the two cursors is set per request; both absent asks
/// for the first page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of cases to return.
    pub page_size: usize,
    /// Opaque cursor for stepping to the page before a prior result.
    pub previous_cursor: Option<String>,
    /// Opaque cursor for stepping to the page after a prior result.
    pub next_cursor: Option<String>,
}

/// One fetched page of cases plus its pagination envelope.
#[derive(Debug, Clone, Default)]
pub struct CasePage {
    /// The cases of this page, in server order.
    pub cases: Vec<Case>,
    /// Token for the page before this one, present iff one exists.
    pub previous_cursor: Option<String>,
    /// Token for the page after this one, present iff one exists.
    pub next_cursor: Option<String>,
    /// Total number of matching cases server-side. Used only to size the
    /// pagination control, never to compute offsets.
    pub total_count: u64,
}

/// A failed page fetch.
///
/// Recoverable: the table keeps showing the last good page and surfaces
/// the message on its error channel.
#[derive(Debug, Clone, Error, Default, PartialEq, Eq)]
#[error("{}", description.as_deref().unwrap_or(DEFAULT_ERROR_MSG))]
pub struct PageError {
    /// Human-readable description from the transport, if it carried one.
    pub description: Option<String>,
}

impl PageError {
    /// The message to surface to the UI layer.
    #[must_use]
    pub fn message(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| DEFAULT_ERROR_MSG.to_string())
    }
}

/// The paged-fetch operation the table source orchestrates.
///
/// Implemented by the service layer over the real backend, and by
/// scripted pagers in tests.
pub trait CasePager: Send + Sync + 'static {
    /// Fetch one page of pending cases.
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<CasePage, PageError>> + Send;
}
