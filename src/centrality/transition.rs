// Transition detection: the first bucket where an emerging keyword's
// weighted degree strictly exceeds a legacy keyword's.
//
// Both series are joined over the table's buckets, with a missing row read
// as 0. This is a first-crossing check only: a later reversal is not
// looked for.

use serde::Serialize;

use super::table::CentralityTable;
use crate::temporal::period::Bucket;

/// One joined row of the two series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedPoint {
    pub bucket: Bucket,
    pub legacy: u64,
    pub emerging: u64,
}

/// A detected (or absent) crossing, with the values at the crossing bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub legacy: String,
    pub emerging: String,
    pub crossing: Option<JoinedPoint>,
}

impl Transition {
    pub fn bucket(&self) -> Option<&Bucket> {
        self.crossing.as_ref().map(|p| &p.bucket)
    }
}

/// Weighted-degree series of both keywords over every bucket in the table.
pub fn joined_series(table: &CentralityTable, legacy: &str, emerging: &str) -> Vec<JoinedPoint> {
    table
        .buckets()
        .map(|bucket| JoinedPoint {
            bucket: bucket.clone(),
            legacy: table.weighted_degree(bucket, legacy),
            emerging: table.weighted_degree(bucket, emerging),
        })
        .collect()
}

/// First bucket, in period order, where `emerging > legacy`. Ties don't
/// count. `None` when the emerging keyword never overtakes.
pub fn detect_transition(
    table: &CentralityTable,
    legacy_keyword: &str,
    emerging_keyword: &str,
) -> Option<Bucket> {
    find_transition(table, legacy_keyword, emerging_keyword)
        .crossing
        .map(|p| p.bucket)
}

/// Same as [`detect_transition`], keeping the values at the crossing.
pub fn find_transition(
    table: &CentralityTable,
    legacy_keyword: &str,
    emerging_keyword: &str,
) -> Transition {
    let crossing = joined_series(table, legacy_keyword, emerging_keyword)
        .into_iter()
        .find(|p| p.emerging > p.legacy);

    Transition {
        legacy: legacy_keyword.to_string(),
        emerging: emerging_keyword.to_string(),
        crossing,
    }
}
