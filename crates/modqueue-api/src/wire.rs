//! Serde DTOs for the moderation backend's JSON.
//!
//! Case records use camelCase keys; the paging envelope and the stats
//! record use snake_case. Field-level `Option`s mirror the backend, which
//! substitutes nulls for missing values rather than erroring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single case as serialized by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Unique, stable case identifier.
    pub id: String,
    /// When the case was created.
    pub create_time: Option<DateTime<Utc>>,
    /// Review state (`ACTIVE`, `RESOLVED`, or unknown strings).
    pub state: Option<String>,
    /// Priority scores for the case.
    pub priority: PriorityRecord,
    /// Free-text notes stored on the case.
    pub notes: Option<String>,
    /// All review decisions made on this case.
    #[serde(default)]
    pub review_history: Vec<ReviewRecord>,
    /// Flags, sorted server-side by creation time. The first flag is the
    /// primary one; the order must not be changed client-side.
    #[serde(default)]
    pub flags: Vec<FlagRecord>,
    /// Additional analysis done on the content.
    pub analysis: Option<AnalysisRecord>,
    /// Raw image bytes of the content, base64-encoded.
    pub image_bytes: Option<String>,
    /// Title of the content, provided by the platform.
    pub title: Option<String>,
    /// Description of the content, provided by the platform.
    pub description: Option<String>,
    /// View count reported by the platform.
    pub views: Option<u64>,
    /// When the content was uploaded to the platform.
    pub upload_time: Option<DateTime<Utc>>,
    /// IP address of the original uploader.
    pub ip_address: Option<String>,
    /// IP region of the original uploader.
    pub ip_region: Option<String>,
    /// Identifiers of cases similar to this one.
    #[serde(default)]
    pub similar_case_ids: Vec<String>,
    /// The content items that flagged this case.
    #[serde(default)]
    pub signal_content: Vec<ContentRecord>,
    /// Entities associated with this case.
    #[serde(default)]
    pub associated_entities: Vec<String>,
}

/// Priority scores attached to a case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityRecord {
    /// Numeric priority score, if computed.
    pub score: Option<f64>,
    /// Qualitative level (`HIGH`/`MEDIUM`/`LOW`).
    pub level: Option<String>,
    /// Confidence level.
    pub confidence: Option<String>,
    /// Severity level.
    pub severity: Option<String>,
}

/// One content item in a case's signal content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// The actual data in the content item.
    pub content_value: Option<String>,
    /// The type of the content item (`URL`, `HASH_PDQ`, `API`, ...).
    pub content_type: Option<String>,
}

/// A flag (report) on a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagRecord {
    /// Source that reported the content (`TCAP`, `GIFCT`, ...).
    pub name: Option<String>,
    /// Original authors of the flag.
    pub authors: Option<Vec<String>>,
    /// When the flag was created.
    pub create_time: Option<DateTime<Utc>>,
    /// Tags attached by the flagging source.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One review decision in a case's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    /// Identifier of the review.
    pub id: Option<String>,
    /// When the review was made.
    pub create_time: Option<DateTime<Utc>>,
    /// The decision (`APPROVE`/`BLOCK`).
    pub decision: Option<String>,
    /// The user who made the decision.
    pub user: Option<String>,
}

/// Analysis scores attached to a case's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Safe Search likelihood scores, when available.
    pub safe_search_scores: Option<SafeSearchRecord>,
}

/// Likelihood score per Safe Search category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeSearchRecord {
    /// Adult content likelihood.
    pub adult: String,
    /// Spoofed content likelihood.
    pub spoof: String,
    /// Medical content likelihood.
    pub medical: String,
    /// Violent content likelihood.
    pub violence: String,
    /// Racy content likelihood.
    pub racy: String,
}

/// The paging envelope returned by `GET /get_cases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse {
    /// The cases for the requested page.
    pub data: Vec<CaseRecord>,
    /// Opaque token for fetching the next page, present iff one exists.
    pub next_cursor_token: Option<String>,
    /// Opaque token for fetching the previous page, present iff one exists.
    pub previous_cursor_token: Option<String>,
    /// Total number of matching cases server-side.
    pub total_count: u64,
}

/// Aggregate review counts returned by `GET /get_review_stats`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReviewStatsRecord {
    /// Cases removed by moderators.
    pub count_removed: u64,
    /// Cases approved (left up).
    pub count_approved: u64,
    /// Cases still awaiting review.
    pub count_active: u64,
}

/// Configuration for one upstream importer integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImporterConfig {
    /// Credentials-based importer (TCAP).
    Tcap(TcapConfig),
    /// Token-based importer (GIFCT).
    Gifct(GifctConfig),
}

/// TCAP importer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcapConfig {
    /// Whether the importer is enabled.
    pub enabled: bool,
    /// Whether diagnostics reporting is enabled.
    pub diagnostics_enabled: bool,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// GIFCT importer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GifctConfig {
    /// Whether the importer is enabled.
    pub enabled: bool,
    /// Whether diagnostics reporting is enabled.
    pub diagnostics_enabled: bool,
    /// Privacy group to import from.
    pub privacy_group_id: String,
    /// API access token.
    pub access_token: String,
}

/// Importer configuration plus run bookkeeping, keyed by importer type.
pub type ImporterConfigs = HashMap<String, ImporterStatusRecord>;

/// One importer's configuration and run status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterStatusRecord {
    /// The importer's configuration.
    pub config: ImporterConfig,
    /// When the importer last ran, if ever.
    pub last_run_time: Option<DateTime<Utc>>,
    /// Total number of items imported so far.
    pub total_import_count: u64,
}

/// Error body produced by the backend for non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code.
    pub code: Option<u16>,
    /// Status name.
    pub name: Option<String>,
    /// Human-readable description of what went wrong.
    pub description: Option<String>,
}
