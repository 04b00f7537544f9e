// Trend queries over a centrality table: era leaders, the keyword x period
// matrix behind the heatmap, first appearances, and zero-filled series.
//
// All of these read one scope's table (aggregate or a single subgroup).
// Totals are sums of weighted degree.

use std::collections::BTreeMap;

use serde::Serialize;

use super::table::CentralityTable;
use crate::temporal::period::{Bucket, Period};

/// Keywords ranked by total weighted degree over an inclusive period window.
/// Ties break alphabetically.
pub fn top_keywords_between(
    table: &CentralityTable,
    from: Period,
    to: Period,
    n: usize,
) -> Vec<(String, u64)> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in table.records() {
        let period = record.bucket.period;
        if period >= from && period <= to {
            *totals.entry(record.keyword.as_str()).or_insert(0) += record.weighted_degree;
        }
    }
    rank(totals, n)
}

/// Keywords ranked by total weighted degree over the whole table.
pub fn top_keywords(table: &CentralityTable, n: usize) -> Vec<(String, u64)> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in table.records() {
        *totals.entry(record.keyword.as_str()).or_insert(0) += record.weighted_degree;
    }
    rank(totals, n)
}

fn rank(totals: BTreeMap<&str, u64>, n: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = totals
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    // stable sort keeps the alphabetical order from the BTreeMap on ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Zero-filled keyword x period matrix of weighted degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CentralityMatrix {
    /// Row labels, by descending total.
    pub keywords: Vec<String>,
    /// Column labels, ascending.
    pub periods: Vec<Period>,
    /// `values[row][column]`
    pub values: Vec<Vec<u64>>,
}

/// Build the matrix for the `top_n` keywords of the table.
pub fn centrality_matrix(table: &CentralityTable, top_n: usize) -> CentralityMatrix {
    let keywords: Vec<String> = top_keywords(table, top_n)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    let periods = table.periods();
    let column: BTreeMap<Period, usize> =
        periods.iter().enumerate().map(|(i, &p)| (p, i)).collect();

    let values = keywords
        .iter()
        .map(|keyword| {
            let mut row = vec![0u64; periods.len()];
            for record in table.keyword_series(keyword) {
                if let Some(&c) = column.get(&record.bucket.period) {
                    row[c] += record.weighted_degree;
                }
            }
            row
        })
        .collect();

    CentralityMatrix {
        keywords,
        periods,
        values,
    }
}

/// A keyword's first appearance in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emergence {
    pub keyword: String,
    pub first_bucket: Bucket,
    pub weighted_degree: u64,
}

/// Keywords absent from the table's earliest bucket, with the bucket where
/// each first appears. Ordered by first bucket, then by weighted degree
/// descending.
pub fn emerging_keywords(table: &CentralityTable) -> Vec<Emergence> {
    let Some(earliest) = table.buckets().next() else {
        return Vec::new();
    };

    let mut emerged: Vec<Emergence> = table
        .keywords()
        .filter_map(|keyword| table.keyword_series(keyword).next())
        .filter(|first| first.bucket != *earliest)
        .map(|first| Emergence {
            keyword: first.keyword.clone(),
            first_bucket: first.bucket.clone(),
            weighted_degree: first.weighted_degree,
        })
        .collect();

    emerged.sort_by(|a, b| {
        a.first_bucket
            .cmp(&b.first_bucket)
            .then_with(|| b.weighted_degree.cmp(&a.weighted_degree))
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    emerged
}

/// Weighted degree of a keyword for every bucket of the table, 0 where it
/// has no row. For continuous plotting of a tracked keyword.
pub fn dense_series(table: &CentralityTable, keyword: &str) -> Vec<(Bucket, u64)> {
    table
        .buckets()
        .map(|bucket| (bucket.clone(), table.weighted_degree(bucket, keyword)))
        .collect()
}
