//! Domain models for moderation cases.

use chrono::{DateTime, Utc};

/// Whether a case is still in need of review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseState {
    /// The case awaits a moderation decision.
    Active,
    /// A decision has been made.
    Resolved,
    /// The backend reported no usable state.
    #[default]
    Unknown,
}

impl CaseState {
    /// Parse from the backend's string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "RESOLVED" => Self::Resolved,
            _ => Self::Unknown,
        }
    }

    /// Convert to the backend's string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Resolved => "RESOLVED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Qualitative grading used for priority level, confidence, and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// High.
    High,
    /// Medium.
    Medium,
    /// Low.
    Low,
}

impl Level {
    /// Parse from the backend's string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// Convert to the backend's string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// The priority of a case.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Priority {
    /// Numeric priority score, if computed.
    pub score: Option<f64>,
    /// Qualitative priority level.
    pub level: Option<Level>,
    /// Confidence in the priority assessment.
    pub confidence: Option<Level>,
    /// Severity of the flagged content.
    pub severity: Option<Level>,
}

/// The type of a content item, typically a URL or some type of image hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// A URL pointing at the content.
    Url,
    /// A PDQ image hash.
    HashPdq,
    /// Content delivered through an API integration.
    Api,
    /// Unrecognized content type.
    #[default]
    Unknown,
}

impl ContentType {
    /// Parse from the backend's string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "URL" => Self::Url,
            "HASH_PDQ" => Self::HashPdq,
            "API" => Self::Api,
            _ => Self::Unknown,
        }
    }
}

/// One content item attached to a case's signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// The actual data of the content item.
    pub value: String,
    /// The type of the content item.
    pub content_type: ContentType,
}

/// The source that reported a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagSource {
    /// Tech Against Terrorism's TCAP feed.
    Tcap,
    /// The GIFCT hash-sharing database.
    Gifct,
    /// A user report.
    UserReport,
    /// Safe Search analysis.
    SafeSearch,
    /// Perspective API analysis.
    Perspective,
    /// Unrecognized source.
    #[default]
    Unknown,
}

impl FlagSource {
    /// Parse from the backend's string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TCAP" => Self::Tcap,
            "GIFCT" => Self::Gifct,
            "USER_REPORT" => Self::UserReport,
            "SAFE_SEARCH" => Self::SafeSearch,
            "PERSPECTIVE" => Self::Perspective,
            _ => Self::Unknown,
        }
    }
}

/// A flag (report) on a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// The source that reported the content.
    pub source: FlagSource,
    /// Original authors of the flag, when known.
    pub authors: Vec<String>,
    /// When the flag was created.
    pub create_time: Option<DateTime<Utc>>,
    /// Tags attached by the flagging source.
    pub tags: Vec<String>,
}

/// The decision made by a moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the content up.
    Approve,
    /// Remove the content.
    Block,
}

impl Decision {
    /// Parse from the backend's string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "APPROVE" => Some(Self::Approve),
            "BLOCK" => Some(Self::Block),
            _ => None,
        }
    }
}

/// A review made on a case by a moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// When the review was made.
    pub create_time: Option<DateTime<Utc>>,
    /// The decision made by the moderator.
    pub decision: Option<Decision>,
    /// The user who made the decision.
    pub user: Option<String>,
}

/// Likelihood returned by Safe Search for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Likelihood {
    /// No score available.
    #[default]
    Unknown,
    /// Very unlikely.
    VeryUnlikely,
    /// Unlikely.
    Unlikely,
    /// Possible.
    Possible,
    /// Likely.
    Likely,
    /// Very likely.
    VeryLikely,
}

impl Likelihood {
    /// Parse from the backend's string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "VERY_UNLIKELY" => Self::VeryUnlikely,
            "UNLIKELY" => Self::Unlikely,
            "POSSIBLE" => Self::Possible,
            "LIKELY" => Self::Likely,
            "VERY_LIKELY" => Self::VeryLikely,
            _ => Self::Unknown,
        }
    }
}

/// Safe Search likelihood per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeSearchScores {
    /// Adult content likelihood.
    pub adult: Likelihood,
    /// Spoofed content likelihood.
    pub spoof: Likelihood,
    /// Medical content likelihood.
    pub medical: Likelihood,
    /// Violent content likelihood.
    pub violence: Likelihood,
    /// Racy content likelihood.
    pub racy: Likelihood,
}

/// Additional analysis done on a case's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Safe Search scores, when available.
    pub safe_search_scores: Option<SafeSearchScores>,
}

/// A unit of flagged content pending a moderation decision.
///
/// Brings together the flagged content, the reports on it, and the
/// metadata a moderator needs to decide.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Unique, stable identifier.
    pub id: String,
    /// When the case was created.
    pub create_time: Option<DateTime<Utc>>,
    /// Whether the case is still in need of review.
    pub state: CaseState,
    /// Priority scores.
    pub priority: Priority,
    /// All decisions made on the case, newest first as served.
    pub review_history: Vec<Review>,
    /// Content items that flagged this case.
    pub signal_content: Vec<Content>,
    /// Flags on the content, sorted server-side by creation time.
    /// The order is authoritative and must not be re-sorted client-side.
    pub flags: Vec<Flag>,
    /// Entities associated with this case.
    pub associated_entities: Vec<String>,
    /// Raw image bytes of the content, base64-encoded.
    pub image_bytes: Option<String>,
    /// Scores of additional analysis done on the content.
    pub analysis: Analysis,
    /// Title of the content, provided by the platform.
    pub title: Option<String>,
    /// Description of the content, provided by the platform.
    pub description: Option<String>,
    /// View count reported by the platform.
    pub views: Option<u64>,
    /// When the content was uploaded.
    pub upload_time: Option<DateTime<Utc>>,
    /// IP address of the original uploader.
    pub ip_address: Option<String>,
    /// IP region of the original uploader.
    pub ip_region: Option<String>,
    /// Identifiers of similar cases.
    pub similar_case_ids: Vec<String>,
    /// Free-text notes a moderator has stored on the case.
    pub notes: Option<String>,
}

impl Case {
    /// Whether the case's content is a URL.
    ///
    /// Only the first content item decides the type.
    #[must_use]
    pub fn is_url(&self) -> bool {
        self.signal_content
            .first()
            .is_some_and(|content| content.content_type == ContentType::Url)
    }

    /// Whether the case's content is an image hash.
    ///
    /// Only the first content item decides the type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.signal_content
            .first()
            .is_some_and(|content| content.content_type == ContentType::HashPdq)
    }

    /// Whether there is a possibility the case represents graphic material.
    ///
    /// Cases without Safe Search scores are treated as potentially
    /// graphic, so unanalyzed content is not shown unblurred.
    #[must_use]
    pub fn is_potentially_graphic(&self) -> bool {
        self.analysis.safe_search_scores.is_none_or(|scores| {
            scores.violence >= Likelihood::Possible || scores.racy >= Likelihood::Possible
        })
    }

    /// The primary flag on this case.
    ///
    /// Flags are sorted server-side by creation time; the first one is
    /// semantically primary.
    #[must_use]
    pub fn first_flag(&self) -> Option<&Flag> {
        self.flags.first()
    }
}

/// Aggregate counts of reviewed and open cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    /// Cases removed by moderators.
    pub count_removed: u64,
    /// Cases approved (left up).
    pub count_approved: u64,
    /// Cases still awaiting review.
    pub count_active: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn case_with_content(content_type: ContentType) -> Case {
        Case {
            id: "c1".to_string(),
            create_time: None,
            state: CaseState::Active,
            priority: Priority::default(),
            review_history: Vec::new(),
            signal_content: vec![Content {
                value: "v".to_string(),
                content_type,
            }],
            flags: Vec::new(),
            associated_entities: Vec::new(),
            image_bytes: None,
            analysis: Analysis::default(),
            title: None,
            description: None,
            views: None,
            upload_time: None,
            ip_address: None,
            ip_region: None,
            similar_case_ids: Vec::new(),
            notes: None,
        }
    }

    #[test]
    fn content_type_detection_uses_first_item() {
        let mut case = case_with_content(ContentType::Url);
        assert!(case.is_url());
        assert!(!case.is_image());

        case.signal_content.insert(
            0,
            Content {
                value: "hash".to_string(),
                content_type: ContentType::HashPdq,
            },
        );
        assert!(case.is_image());
        assert!(!case.is_url());
    }

    #[test]
    fn empty_content_is_neither_url_nor_image() {
        let mut case = case_with_content(ContentType::Url);
        case.signal_content.clear();
        assert!(!case.is_url());
        assert!(!case.is_image());
    }

    #[test]
    fn first_flag_is_primary() {
        let mut case = case_with_content(ContentType::Url);
        assert!(case.first_flag().is_none());

        case.flags = vec![
            Flag {
                source: FlagSource::Tcap,
                authors: Vec::new(),
                create_time: None,
                tags: Vec::new(),
            },
            Flag {
                source: FlagSource::UserReport,
                authors: Vec::new(),
                create_time: None,
                tags: Vec::new(),
            },
        ];
        assert_eq!(case.first_flag().unwrap().source, FlagSource::Tcap);
    }

    #[test]
    fn graphic_detection_uses_safe_search_likelihoods() {
        let mut case = case_with_content(ContentType::Url);
        // Unanalyzed content counts as potentially graphic.
        assert!(case.is_potentially_graphic());

        case.analysis.safe_search_scores = Some(SafeSearchScores {
            violence: Likelihood::VeryUnlikely,
            racy: Likelihood::Unlikely,
            ..SafeSearchScores::default()
        });
        assert!(!case.is_potentially_graphic());

        case.analysis.safe_search_scores = Some(SafeSearchScores {
            racy: Likelihood::Possible,
            ..SafeSearchScores::default()
        });
        assert!(case.is_potentially_graphic());

        case.analysis.safe_search_scores = Some(SafeSearchScores {
            violence: Likelihood::VeryLikely,
            ..SafeSearchScores::default()
        });
        assert!(case.is_potentially_graphic());
    }

    #[test]
    fn state_round_trips() {
        assert_eq!(CaseState::parse("active"), CaseState::Active);
        assert_eq!(CaseState::parse("RESOLVED"), CaseState::Resolved);
        assert_eq!(CaseState::parse("bogus"), CaseState::Unknown);
        assert_eq!(CaseState::Active.as_str(), "ACTIVE");
    }

    #[test]
    fn level_parse() {
        assert_eq!(Level::parse("high"), Some(Level::High));
        assert_eq!(Level::parse(""), None);
    }
}
