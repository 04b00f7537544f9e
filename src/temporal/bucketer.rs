// Period bucketer: assigns documents to (period, subgroup) buckets.
//
// Every accepted document lands in two buckets: the aggregate bucket for its
// period and the bucket of its own subgroup. Documents with an unparseable
// timestamp or no text are excluded and recorded as rejections.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::period::{Bucket, Granularity, Subgroup, SubgroupKey};
use crate::corpus::document::Document;

/// Why a document was excluded from bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    UnparseableTimestamp(String),
    MissingText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub document_id: String,
    pub reason: RejectionReason,
}

/// Inclusive calendar window; documents outside it are filtered out (not
/// rejected). Both ends open by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// The result of bucketing a document sequence.
#[derive(Debug, Clone, Default)]
pub struct Bucketing<'a> {
    /// Documents per bucket, in input order. Buckets without documents are
    /// absent.
    pub buckets: BTreeMap<Bucket, Vec<&'a Document>>,
    pub rejections: Vec<Rejection>,
    /// Valid documents dropped by the date window.
    pub out_of_window: usize,
    /// Documents that made it into at least one bucket.
    pub accepted: usize,
}

impl<'a> Bucketing<'a> {
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Named subgroups present, in order.
    pub fn subgroups(&self) -> BTreeSet<&Subgroup> {
        self.buckets
            .keys()
            .map(|b| &b.subgroup)
            .filter(|s| **s != Subgroup::All)
            .collect()
    }

    /// The buckets of one subgroup (or of the aggregate).
    pub fn scope(&self, subgroup: &Subgroup) -> BTreeMap<Bucket, &[&'a Document]> {
        self.buckets
            .iter()
            .filter(|(bucket, _)| bucket.subgroup == *subgroup)
            .map(|(bucket, docs)| (bucket.clone(), docs.as_slice()))
            .collect()
    }
}

/// Bucket documents by calendar period and subgroup.
pub fn bucket<'a>(
    documents: &'a [Document],
    granularity: Granularity,
    subgroup_key: &SubgroupKey,
) -> Bucketing<'a> {
    bucket_within(documents, granularity, subgroup_key, &DateWindow::default())
}

/// Same as [`bucket`], keeping only documents dated inside `window`.
pub fn bucket_within<'a>(
    documents: &'a [Document],
    granularity: Granularity,
    subgroup_key: &SubgroupKey,
    window: &DateWindow,
) -> Bucketing<'a> {
    let mut result = Bucketing::default();

    for document in documents {
        let Some(date) = document.date() else {
            debug!(id = %document.id, timestamp = %document.timestamp, "Unparseable timestamp");
            result.rejections.push(Rejection {
                document_id: document.id.clone(),
                reason: RejectionReason::UnparseableTimestamp(document.timestamp.clone()),
            });
            continue;
        };

        if document.text.is_none() {
            debug!(id = %document.id, "Document has no text");
            result.rejections.push(Rejection {
                document_id: document.id.clone(),
                reason: RejectionReason::MissingText,
            });
            continue;
        }

        if !window.contains(date) {
            result.out_of_window += 1;
            continue;
        }

        let period = granularity.period_of(date);
        result
            .buckets
            .entry(Bucket::all(period))
            .or_default()
            .push(document);
        if let Some(label) = subgroup_key.select(document) {
            result
                .buckets
                .entry(Bucket::named(period, label))
                .or_default()
                .push(document);
        }
        result.accepted += 1;
    }

    if !result.rejections.is_empty() {
        warn!(
            rejected = result.rejections.len(),
            "Excluded documents with unparseable timestamps or missing text"
        );
    }
    info!(
        granularity = %granularity,
        accepted = result.accepted,
        out_of_window = result.out_of_window,
        buckets = result.buckets.len(),
        "Bucketed documents"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::period::Period;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("a", "HBM", "2021-02-01", "Samsung"),
            Document::new("b", "DRAM", "2021-11-30", "SKHynix"),
            Document::new("c", "AI", "not a date", "Samsung"),
            Document::new("d", "NAND", "2022.01.05", "Samsung"),
        ]
    }

    #[test]
    fn test_aggregate_and_subgroup_buckets() {
        let docs = docs();
        let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);

        assert_eq!(result.accepted, 3);
        assert_eq!(result.rejected(), 1);
        assert_eq!(result.buckets[&Bucket::all(Period::Year(2021))].len(), 2);
        assert_eq!(result.buckets[&Bucket::named(Period::Year(2021), "Samsung")].len(), 1);
        assert_eq!(result.buckets[&Bucket::named(Period::Year(2021), "SKHynix")].len(), 1);
        assert!(!result
            .buckets
            .contains_key(&Bucket::named(Period::Year(2022), "SKHynix")));
    }

    #[test]
    fn test_rejection_reasons() {
        let mut docs = docs();
        docs.push(Document {
            text: None,
            ..Document::new("e", "", "2021-01-01", "Samsung")
        });
        let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);
        assert_eq!(
            result.rejections,
            vec![
                Rejection {
                    document_id: "c".to_string(),
                    reason: RejectionReason::UnparseableTimestamp("not a date".to_string()),
                },
                Rejection {
                    document_id: "e".to_string(),
                    reason: RejectionReason::MissingText,
                },
            ]
        );
    }

    #[test]
    fn test_quarter_keys() {
        let docs = docs();
        let result = bucket(&docs, Granularity::Quarter, &SubgroupKey::Subgroup);
        let periods: Vec<Period> = result
            .scope(&Subgroup::All)
            .keys()
            .map(|b| b.period)
            .collect();
        assert_eq!(
            periods,
            vec![
                Period::Quarter { year: 2021, quarter: 1 },
                Period::Quarter { year: 2021, quarter: 4 },
                Period::Quarter { year: 2022, quarter: 1 },
            ]
        );
    }

    #[test]
    fn test_window_filters() {
        let docs = docs();
        let window = DateWindow {
            start: NaiveDate::from_ymd_opt(2021, 6, 1),
            end: NaiveDate::from_ymd_opt(2021, 12, 31),
        };
        let result = bucket_within(&docs, Granularity::Year, &SubgroupKey::Subgroup, &window);
        assert_eq!(result.accepted, 1);
        assert_eq!(result.out_of_window, 2);
        assert_eq!(result.rejected(), 1);
    }

    #[test]
    fn test_subgroups_listed() {
        let docs = docs();
        let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);
        let names: Vec<&str> = result.subgroups().into_iter().map(|s| s.label()).collect();
        assert_eq!(names, vec!["SKHynix", "Samsung"]);
    }
}
