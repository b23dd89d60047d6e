//! Review decisions and aggregate stats.

use modqueue_api::{ApiClient, ReviewDecision};
use tracing::info;

use crate::case::{Decision, ReviewStats};
use crate::error::Result;

/// Saves and undoes moderation decisions.
///
/// Saved reviews are drafts: the backend publishes them after roughly 60
/// seconds, during which [`ReviewService::undo`] can delete them. UI
/// layers typically surface that window as an "Undo" affordance.
#[derive(Debug, Clone)]
pub struct ReviewService {
    client: ApiClient,
}

impl ReviewService {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Saves a decision for a set of cases.
    ///
    /// Returns the identifiers of the created draft reviews, usable with
    /// [`Self::undo`] during the undo window.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn save(&self, case_ids: &[String], decision: Decision) -> Result<Vec<String>> {
        let wire_decision = match decision {
            Decision::Approve => ReviewDecision::Approve,
            Decision::Block => ReviewDecision::Block,
        };
        let review_ids = self.client.add_reviews(case_ids, wire_decision).await?;
        info!(?case_ids, "review decision saved");
        Ok(review_ids)
    }

    /// Deletes draft reviews before the backend publishes them.
    ///
    /// Only possible for a limited amount of time after
    /// [`Self::save`]; afterwards the decisions have been delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn undo(&self, review_ids: &[String]) -> Result<()> {
        self.client.remove_reviews(review_ids).await?;
        info!(?review_ids, "review decisions deleted");
        Ok(())
    }

    /// Fetches aggregate counts of removed/approved/active cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn stats(&self) -> Result<ReviewStats> {
        let record = self.client.get_review_stats().await?;
        Ok(record.into())
    }
}
