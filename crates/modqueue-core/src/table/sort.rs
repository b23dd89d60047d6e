//! Client-side ordering of a fetched page.

use std::cmp::Ordering;

use crate::case::Case;

/// Columns of the case table a sort can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseColumn {
    /// The case's content summary.
    Content,
    /// Priority score.
    Priority,
    /// View count.
    Views,
    /// Content upload time.
    UploadTime,
    /// The flagging source.
    Flagger,
}

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// An active sort: column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// Column the sort targets.
    pub column: CaseColumn,
    /// Sort direction.
    pub direction: SortDirection,
}

/// A sortable value extracted from a case.
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    /// Coerce to text, the way a dynamic comparand would stringify.
    fn into_text(self) -> String {
        match self {
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{value:.0}")
                } else {
                    value.to_string()
                }
            }
            Self::Text(text) => text,
        }
    }
}

/// The sort key for `case` under `column`.
///
/// Columns without a numeric accessor yield a constant empty string, so
/// sorting by them is a stable no-op. A missing value yields `None`.
fn sort_value(case: &Case, column: CaseColumn) -> Option<SortValue> {
    match column {
        CaseColumn::Priority => Some(SortValue::Number(case.priority.score.unwrap_or(0.0))),
        #[allow(clippy::cast_precision_loss)]
        CaseColumn::UploadTime => case
            .upload_time
            .map(|time| SortValue::Number(time.timestamp_millis() as f64)),
        #[allow(clippy::cast_precision_loss)]
        CaseColumn::Views => case.views.map(|views| SortValue::Number(views as f64)),
        CaseColumn::Content | CaseColumn::Flagger => Some(SortValue::Text(String::new())),
    }
}

/// Tolerant comparison of two optional sort keys.
///
/// Present values sort before missing ones; mixed numeric/text comparands
/// are coerced to text before comparing; incomparable pairs tie.
fn compare_values(a: Option<SortValue>, b: Option<SortValue>) -> Ordering {
    match (a, b) {
        (Some(SortValue::Number(a)), Some(SortValue::Number(b))) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(a), Some(b)) => a.into_text().cmp(&b.into_text()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts `cases` in place according to `sort`, if one is active.
///
/// No-op when `sort` is `None`; the page keeps whatever order the fetch
/// returned. The underlying sort is stable, so ties keep their relative
/// order.
pub fn order_cases(cases: &mut [Case], sort: Option<Sort>) {
    let Some(sort) = sort else {
        return;
    };
    cases.sort_by(|a, b| {
        let ordering = compare_values(
            sort_value(a, sort.column),
            sort_value(b, sort.column),
        );
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::case::{Analysis, CaseState, Priority};
    use chrono::{TimeZone, Utc};

    fn case(id: &str, score: Option<f64>, views: Option<u64>, upload_secs: Option<i64>) -> Case {
        Case {
            id: id.to_string(),
            create_time: None,
            state: CaseState::Active,
            priority: Priority {
                score,
                ..Priority::default()
            },
            review_history: Vec::new(),
            signal_content: Vec::new(),
            flags: Vec::new(),
            associated_entities: Vec::new(),
            image_bytes: None,
            analysis: Analysis::default(),
            title: None,
            description: None,
            views,
            upload_time: upload_secs.map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap()),
            ip_address: None,
            ip_region: None,
            similar_case_ids: Vec::new(),
            notes: None,
        }
    }

    fn ids(cases: &[Case]) -> Vec<&str> {
        cases.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn upload_time_descending_reverses_ascending() {
        let mut ascending = vec![
            case("b", None, None, Some(200)),
            case("a", None, None, Some(100)),
            case("c", None, None, Some(300)),
        ];
        let mut descending = ascending.clone();

        order_cases(
            &mut ascending,
            Some(Sort {
                column: CaseColumn::UploadTime,
                direction: SortDirection::Ascending,
            }),
        );
        order_cases(
            &mut descending,
            Some(Sort {
                column: CaseColumn::UploadTime,
                direction: SortDirection::Descending,
            }),
        );

        assert_eq!(ids(&ascending), vec!["a", "b", "c"]);
        let mut reversed = ascending;
        reversed.reverse();
        assert_eq!(ids(&descending), ids(&reversed));
    }

    #[test]
    fn unsortable_column_keeps_order() {
        let mut cases = vec![
            case("x", Some(0.9), None, None),
            case("y", Some(0.1), None, None),
            case("z", Some(0.5), None, None),
        ];
        order_cases(
            &mut cases,
            Some(Sort {
                column: CaseColumn::Content,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&cases), vec!["x", "y", "z"]);
    }

    #[test]
    fn no_active_sort_is_a_no_op() {
        let mut cases = vec![case("x", Some(0.9), None, None), case("y", Some(0.1), None, None)];
        order_cases(&mut cases, None);
        assert_eq!(ids(&cases), vec!["x", "y"]);
    }

    #[test]
    fn missing_priority_score_counts_as_zero() {
        let mut cases = vec![
            case("scored", Some(0.4), None, None),
            case("unscored", None, None, None),
        ];
        order_cases(
            &mut cases,
            Some(Sort {
                column: CaseColumn::Priority,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&cases), vec!["unscored", "scored"]);
    }

    #[test]
    fn missing_values_sort_after_present() {
        let mut cases = vec![
            case("unviewed", None, None, None),
            case("viewed", None, Some(5), None),
        ];
        order_cases(
            &mut cases,
            Some(Sort {
                column: CaseColumn::Views,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&cases), vec!["viewed", "unviewed"]);
    }

    #[test]
    fn views_sort_numerically() {
        let mut cases = vec![
            case("ten", None, Some(10), None),
            case("two", None, Some(2), None),
            case("hundred", None, Some(100), None),
        ];
        order_cases(
            &mut cases,
            Some(Sort {
                column: CaseColumn::Views,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&cases), vec!["two", "ten", "hundred"]);
    }
}
