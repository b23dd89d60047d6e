//! HTTP client for the moderation backend.

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::wire::{
    CaseRecord, ErrorBody, ImporterConfig, ImporterConfigs, PaginatedResponse, ReviewStatsRecord,
};

/// The review decision sent to the backend.
///
/// Wire values match the backend enum: block = 1, approve = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Remove the content.
    Block,
    /// Leave the content up.
    Approve,
}

impl ReviewDecision {
    /// Numeric wire representation.
    #[must_use]
    pub const fn as_wire(self) -> u8 {
        match self {
            Self::Block => 1,
            Self::Approve => 2,
        }
    }
}

/// Client for the moderation backend's REST endpoints.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.http = http;
        client
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch a single case by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get_case(&self, case_id: &str) -> Result<CaseRecord> {
        let response = self.http.get(self.url(&format!("get_case/{case_id}"))).send().await?;
        Self::decode(response).await
    }

    /// Fetch one page of pending cases.
    ///
    /// At most one of the two cursor tokens is sent per call; both absent
    /// requests the first page.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get_cases(
        &self,
        page_size: usize,
        previous_cursor_token: Option<&str>,
        next_cursor_token: Option<&str>,
    ) -> Result<PaginatedResponse> {
        debug!(page_size, "fetching pending cases");
        let response = self
            .http
            .get(self.url("get_cases"))
            .query(&[
                ("page_size", page_size.to_string().as_str()),
                ("next_cursor_token", next_cursor_token.unwrap_or("")),
                ("previous_cursor_token", previous_cursor_token.unwrap_or("")),
            ])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Replace the notes stored on a case.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn add_notes(&self, case_id: &str, notes: &str) -> Result<()> {
        let response = self
            .http
            .patch(self.url("add_notes"))
            .json(&json!({ "case_id": case_id, "notes": notes }))
            .send()
            .await?;
        Self::expect_success(response).await?;
        info!(case_id, "successfully added notes");
        Ok(())
    }

    /// Save a review decision for a set of cases.
    ///
    /// Returns the identifiers of the created draft reviews, which can be
    /// passed to [`Self::remove_reviews`] during the undo window before
    /// the server publishes them.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn add_reviews(
        &self,
        case_ids: &[String],
        decision: ReviewDecision,
    ) -> Result<Vec<String>> {
        info!(?decision, ?case_ids, "saving review decision");
        let response = self
            .http
            .post(self.url("add_reviews"))
            .json(&json!({ "case_ids": case_ids, "decision": decision.as_wire() }))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Delete draft reviews created by [`Self::add_reviews`].
    ///
    /// Only possible during the undo window (roughly 60 seconds) before
    /// the server publishes the decisions.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn remove_reviews(&self, review_ids: &[String]) -> Result<()> {
        info!(?review_ids, "deleting review decisions");
        let response = self
            .http
            .delete(self.url("remove_reviews"))
            .json(&json!({ "review_ids": review_ids }))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// Fetch aggregate review counts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get_review_stats(&self) -> Result<ReviewStatsRecord> {
        let response = self.http.get(self.url("get_review_stats")).send().await?;
        Self::decode(response).await
    }

    /// Fetch the configuration of all upstream importers.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get_importer_configs(&self) -> Result<ImporterConfigs> {
        let response = self.http.get(self.url("get_importer_configs")).send().await?;
        Self::decode(response).await
    }

    /// Update importer configurations, keyed by importer type.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn update_importer_configs(
        &self,
        configs: &std::collections::HashMap<String, ImporterConfig>,
    ) -> Result<()> {
        info!(importers = ?configs.keys().collect::<Vec<_>>(), "saving importer configs");
        let response = self
            .http
            .post(self.url("update_importer_configs"))
            .json(configs)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// Upload an image to match against, as a named data URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn upload_image(&self, name: &str, image_data_url: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("upload_image"))
            .json(&json!({ "name": name, "image": image_data_url }))
            .send()
            .await?;
        Self::expect_success(response).await?;
        info!(name, "successfully uploaded image");
        Ok(())
    }

    /// Decode a JSON body, surfacing backend error descriptions.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::backend_error(status.as_u16(), response).await)
        }
    }

    /// Check the status of a response whose body carries no data.
    async fn expect_success(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(status.as_u16(), response).await)
        }
    }

    async fn backend_error(status: u16, response: reqwest::Response) -> Error {
        let description = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.description);
        Error::Backend {
            status,
            description,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080///");
        assert_eq!(client.url("get_cases"), "http://localhost:8080/get_cases");
        assert_eq!(
            client.url("/get_case/abc"),
            "http://localhost:8080/get_case/abc"
        );
    }

    #[test]
    fn decision_wire_values() {
        assert_eq!(ReviewDecision::Block.as_wire(), 1);
        assert_eq!(ReviewDecision::Approve.as_wire(), 2);
    }
}
