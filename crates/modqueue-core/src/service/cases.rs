//! Case fetching over the backend API.

use modqueue_api::ApiClient;
use tracing::info;

use crate::case::Case;
use crate::error::Result;
use crate::table::{CasePage, CasePager, PageError, PageRequest};

/// Fetches cases from the backend and converts them to domain models.
///
/// Implements [`CasePager`], so it plugs straight into a
/// [`crate::table::CaseTableSource`].
#[derive(Debug, Clone)]
pub struct CaseService {
    client: ApiClient,
}

impl CaseService {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches a single case by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn get_case(&self, case_id: &str) -> Result<Case> {
        let record = self.client.get_case(case_id).await?;
        Ok(record.into())
    }

    /// Fetches one page of pending cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn get_pending_cases(
        &self,
        page_size: usize,
        previous_cursor: Option<&str>,
        next_cursor: Option<&str>,
    ) -> Result<CasePage> {
        let response = self
            .client
            .get_cases(page_size, previous_cursor, next_cursor)
            .await?;
        Ok(CasePage {
            cases: response.data.into_iter().map(Case::from).collect(),
            previous_cursor: response.previous_cursor_token,
            next_cursor: response.next_cursor_token,
            total_count: response.total_count,
        })
    }

    /// Stores free-text notes on a case.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn add_note(&self, case_id: &str, notes: &str) -> Result<()> {
        self.client.add_notes(case_id, notes).await?;
        info!(case_id, "notes saved");
        Ok(())
    }
}

/// Maps a backend error into the table source's recoverable fetch error.
///
/// Backend errors surface their description; transport errors surface
/// their display form. A backend error with no description falls back to
/// the generic message at display time.
fn page_error(err: modqueue_api::Error) -> PageError {
    match err {
        modqueue_api::Error::Backend { description, .. } => PageError { description },
        other => PageError {
            description: Some(other.to_string()),
        },
    }
}

impl CasePager for CaseService {
    async fn fetch_page(&self, request: PageRequest) -> std::result::Result<CasePage, PageError> {
        self.get_pending_cases(
            request.page_size,
            request.previous_cursor.as_deref(),
            request.next_cursor.as_deref(),
        )
        .await
        .map_err(|err| match err {
            crate::Error::Api(api_err) => page_error(api_err),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_without_description_uses_fallback_message() {
        let err = page_error(modqueue_api::Error::Backend {
            status: 500,
            description: None,
        });
        assert_eq!(err.message(), "An unknown error occurred.");
    }

    #[test]
    fn backend_description_is_preserved() {
        let err = page_error(modqueue_api::Error::Backend {
            status: 400,
            description: Some("bad cursor".to_string()),
        });
        assert_eq!(err.message(), "bad cursor");
    }
}
