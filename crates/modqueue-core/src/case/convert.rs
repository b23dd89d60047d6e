//! Conversions from wire records to domain models.

use modqueue_api::wire;

use super::model::{
    Analysis, Case, CaseState, Content, ContentType, Decision, Flag, FlagSource, Level,
    Likelihood, Priority, Review, ReviewStats, SafeSearchScores,
};

impl From<wire::PriorityRecord> for Priority {
    fn from(record: wire::PriorityRecord) -> Self {
        Self {
            score: record.score,
            level: record.level.as_deref().and_then(Level::parse),
            confidence: record.confidence.as_deref().and_then(Level::parse),
            severity: record.severity.as_deref().and_then(Level::parse),
        }
    }
}

impl From<wire::ContentRecord> for Content {
    fn from(record: wire::ContentRecord) -> Self {
        Self {
            value: record.content_value.unwrap_or_default(),
            content_type: record
                .content_type
                .as_deref()
                .map(ContentType::parse)
                .unwrap_or_default(),
        }
    }
}

impl From<wire::FlagRecord> for Flag {
    fn from(record: wire::FlagRecord) -> Self {
        Self {
            source: record
                .name
                .as_deref()
                .map(FlagSource::parse)
                .unwrap_or_default(),
            authors: record.authors.unwrap_or_default(),
            create_time: record.create_time,
            tags: record.tags,
        }
    }
}

impl From<wire::ReviewRecord> for Review {
    fn from(record: wire::ReviewRecord) -> Self {
        Self {
            create_time: record.create_time,
            decision: record.decision.as_deref().and_then(Decision::parse),
            user: record.user,
        }
    }
}

impl From<wire::SafeSearchRecord> for SafeSearchScores {
    fn from(record: wire::SafeSearchRecord) -> Self {
        Self {
            adult: Likelihood::parse(&record.adult),
            spoof: Likelihood::parse(&record.spoof),
            medical: Likelihood::parse(&record.medical),
            violence: Likelihood::parse(&record.violence),
            racy: Likelihood::parse(&record.racy),
        }
    }
}

impl From<wire::AnalysisRecord> for Analysis {
    fn from(record: wire::AnalysisRecord) -> Self {
        Self {
            safe_search_scores: record.safe_search_scores.map(Into::into),
        }
    }
}

impl From<wire::CaseRecord> for Case {
    fn from(record: wire::CaseRecord) -> Self {
        Self {
            id: record.id,
            create_time: record.create_time,
            state: record
                .state
                .as_deref()
                .map(CaseState::parse)
                .unwrap_or_default(),
            priority: record.priority.into(),
            review_history: record.review_history.into_iter().map(Into::into).collect(),
            signal_content: record.signal_content.into_iter().map(Into::into).collect(),
            // Server-sorted order is authoritative; keep it as-is.
            flags: record.flags.into_iter().map(Into::into).collect(),
            associated_entities: record.associated_entities,
            image_bytes: record.image_bytes,
            analysis: record.analysis.map(Into::into).unwrap_or_default(),
            title: record.title,
            description: record.description,
            views: record.views,
            upload_time: record.upload_time,
            ip_address: record.ip_address,
            ip_region: record.ip_region,
            similar_case_ids: record.similar_case_ids,
            notes: record.notes,
        }
    }
}

impl From<wire::ReviewStatsRecord> for ReviewStats {
    fn from(record: wire::ReviewStatsRecord) -> Self {
        Self {
            count_removed: record.count_removed,
            count_approved: record.count_approved,
            count_active: record.count_active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_case_converts_to_domain() {
        let json = r#"{
            "id": "case-1",
            "state": "ACTIVE",
            "priority": {"score": 0.5, "level": "HIGH"},
            "flags": [{"name": "GIFCT", "createTime": "2024-01-01T00:00:00Z", "tags": ["t"]}],
            "signalContent": [{"contentValue": "https://x.test", "contentType": "URL"}],
            "views": 7
        }"#;
        let record: wire::CaseRecord = serde_json::from_str(json).unwrap();
        let case: Case = record.into();

        assert_eq!(case.state, CaseState::Active);
        assert_eq!(case.priority.level, Some(Level::High));
        assert_eq!(case.first_flag().unwrap().source, FlagSource::Gifct);
        assert!(case.is_url());
        assert_eq!(case.views, Some(7));
    }

    #[test]
    fn unknown_strings_fall_back() {
        let record = wire::ContentRecord {
            content_value: None,
            content_type: Some("SOMETHING_NEW".to_string()),
        };
        let content: Content = record.into();
        assert_eq!(content.content_type, ContentType::Unknown);
        assert!(content.value.is_empty());
    }
}
