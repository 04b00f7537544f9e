// CentralityTable: long-form (bucket, keyword) centrality rows.
//
// Rows are stored grouped by bucket, and within a bucket by descending
// weighted degree. Two indexes over the same rows give the keyword view
// (trend across buckets) and the bucket view (top-N snapshot) without
// recomputing anything. A keyword absent from a bucket has no row.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use crate::temporal::period::{Bucket, Period, Subgroup};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRecord {
    pub bucket: Bucket,
    pub keyword: String,
    /// Edge count over (nodes - 1); 0 in a single-node network.
    pub degree_centrality: f64,
    /// Sum of incident edge weights.
    pub weighted_degree: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CentralityTable {
    records: Vec<CentralityRecord>,
    #[serde(skip)]
    by_keyword: BTreeMap<String, Vec<usize>>,
    #[serde(skip)]
    by_bucket: BTreeMap<Bucket, Range<usize>>,
}

impl CentralityTable {
    /// Build a table from rows in any order. Duplicate (bucket, keyword)
    /// rows are kept as given; the tracker never produces them.
    pub fn from_records(mut records: Vec<CentralityRecord>) -> Self {
        records.sort_by(|x, y| {
            x.bucket
                .cmp(&y.bucket)
                .then_with(|| y.weighted_degree.cmp(&x.weighted_degree))
                .then_with(|| x.keyword.cmp(&y.keyword))
        });

        let mut by_keyword: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut by_bucket: BTreeMap<Bucket, Range<usize>> = BTreeMap::new();

        for (i, record) in records.iter().enumerate() {
            by_keyword.entry(record.keyword.clone()).or_default().push(i);
            by_bucket
                .entry(record.bucket.clone())
                .and_modify(|range| range.end = i + 1)
                .or_insert(i..i + 1);
        }

        Self {
            records,
            by_keyword,
            by_bucket,
        }
    }

    pub fn records(&self) -> &[CentralityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Buckets with at least one row, in period order.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.by_bucket.keys()
    }

    /// Distinct periods with at least one row, ascending.
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.by_bucket.keys().map(|b| b.period).collect();
        periods.dedup();
        periods
    }

    /// Keywords with at least one row, alphabetical.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.by_keyword.keys().map(String::as_str)
    }

    /// Every row for one keyword, ordered by bucket.
    pub fn keyword_series<'a>(
        &'a self,
        keyword: &str,
    ) -> impl Iterator<Item = &'a CentralityRecord> + 'a {
        self.by_keyword
            .get(keyword)
            .into_iter()
            .flatten()
            .map(|&i| &self.records[i])
    }

    /// Every row for one bucket, by descending weighted degree.
    pub fn bucket_snapshot(&self, bucket: &Bucket) -> &[CentralityRecord] {
        match self.by_bucket.get(bucket) {
            Some(range) => &self.records[range.clone()],
            None => &[],
        }
    }

    /// The `n` most central keywords of a bucket.
    pub fn top_n(&self, bucket: &Bucket, n: usize) -> &[CentralityRecord] {
        let snapshot = self.bucket_snapshot(bucket);
        &snapshot[..n.min(snapshot.len())]
    }

    pub fn get(&self, bucket: &Bucket, keyword: &str) -> Option<&CentralityRecord> {
        self.bucket_snapshot(bucket)
            .iter()
            .find(|r| r.keyword == keyword)
    }

    /// Weighted degree of a keyword in a bucket; 0 when it has no row.
    pub fn weighted_degree(&self, bucket: &Bucket, keyword: &str) -> u64 {
        self.get(bucket, keyword).map_or(0, |r| r.weighted_degree)
    }

    /// The rows belonging to one subgroup, as their own table.
    pub fn subgroup_view(&self, subgroup: &Subgroup) -> CentralityTable {
        Self::from_records(
            self.records
                .iter()
                .filter(|r| r.bucket.subgroup == *subgroup)
                .cloned()
                .collect(),
        )
    }
}
