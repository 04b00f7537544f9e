// Unit tests for date parsing, period truncation and bucketing.
//
// Bucketing is tested through the public API only: rejections, window
// filtering, aggregate vs. subgroup buckets, and metadata-based subgroups.

use chrono::NaiveDate;

use trendnet::corpus::document::{parse_date, Document};
use trendnet::temporal::bucketer::{bucket, bucket_within, DateWindow, RejectionReason};
use trendnet::temporal::period::{Bucket, Granularity, Period, Subgroup, SubgroupKey};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================
// parse_date: mixed source formats
// ============================================================

#[test]
fn parses_every_collector_format() {
    let expected = date(2023, 4, 7);
    for raw in [
        "2023-04-07",
        "2023.04.07",
        "2023.04.07.",
        "2023/04/07",
        "20230407",
        "2023-04-07 09:30",
        "2023-04-07 09:30:15",
        "2023-04-07T09:30:15+09:00",
    ] {
        assert_eq!(parse_date(raw), Some(expected), "failed on {raw:?}");
    }
}

#[test]
fn rejects_garbage_dates() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("yesterday"), None);
    assert_eq!(parse_date("2023-13-01"), None);
}

// ============================================================
// Granularity: calendar truncation
// ============================================================

#[test]
fn truncation_at_each_granularity() {
    let d = date(2021, 5, 17);
    assert_eq!(Granularity::Year.period_of(d), Period::Year(2021));
    assert_eq!(
        Granularity::Quarter.period_of(d),
        Period::Quarter { year: 2021, quarter: 2 }
    );
    assert_eq!(
        Granularity::Month.period_of(d),
        Period::Month { year: 2021, month: 5 }
    );
}

#[test]
fn unknown_granularity_is_a_config_error() {
    assert!("decade".parse::<Granularity>().is_err());
    assert_eq!("quarter".parse::<Granularity>().unwrap(), Granularity::Quarter);
}

#[test]
fn periods_sort_chronologically() {
    let mut periods = vec![
        Period::Month { year: 2022, month: 1 },
        Period::Month { year: 2021, month: 12 },
        Period::Month { year: 2021, month: 2 },
    ];
    periods.sort();
    assert_eq!(
        periods,
        vec![
            Period::Month { year: 2021, month: 2 },
            Period::Month { year: 2021, month: 12 },
            Period::Month { year: 2022, month: 1 },
        ]
    );
}

// ============================================================
// Bucketing
// ============================================================

fn corpus() -> Vec<Document> {
    let mut missing = Document::new("m", "", "2021-03-01", "Samsung");
    missing.text = None;
    vec![
        Document::new("a", "HBM", "2021-02-01", "Samsung"),
        Document::new("b", "DRAM", "2021.11.30", "SKHynix"),
        Document::new("c", "AI", "someday", "Samsung"),
        Document::new("d", "NAND", "2022-01-05", "Samsung"),
        Document::new("e", "EUV", "2013-06-01", "Samsung"),
        Document::new("f", "TSV", "2022-03-03", ""),
        missing,
    ]
}

#[test]
fn bad_documents_are_rejected_not_fatal() {
    let docs = corpus();
    let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);

    assert_eq!(result.rejected(), 2);
    assert_eq!(result.accepted, 5);
    assert!(result.rejections.iter().any(|r| r.document_id == "c"
        && r.reason == RejectionReason::UnparseableTimestamp("someday".to_string())));
    assert!(result
        .rejections
        .iter()
        .any(|r| r.document_id == "m" && r.reason == RejectionReason::MissingText));
}

#[test]
fn documents_join_aggregate_and_subgroup_buckets() {
    let docs = corpus();
    let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);

    let all_2021 = &result.buckets[&Bucket::all(Period::Year(2021))];
    assert_eq!(all_2021.len(), 2);
    assert_eq!(result.buckets[&Bucket::named(Period::Year(2021), "Samsung")].len(), 1);
    assert_eq!(result.buckets[&Bucket::named(Period::Year(2021), "SKHynix")].len(), 1);

    // unlabeled document only lands in the aggregate
    assert_eq!(result.buckets[&Bucket::all(Period::Year(2022))].len(), 2);
    assert_eq!(result.buckets[&Bucket::named(Period::Year(2022), "Samsung")].len(), 1);
}

#[test]
fn empty_buckets_are_absent() {
    let docs = corpus();
    let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);
    assert!(!result.buckets.contains_key(&Bucket::all(Period::Year(2019))));
    assert!(!result
        .buckets
        .contains_key(&Bucket::named(Period::Year(2022), "SKHynix")));
}

#[test]
fn window_filters_without_rejecting() {
    let docs = corpus();
    let window = DateWindow {
        start: Some(date(2014, 1, 1)),
        end: Some(date(2021, 12, 31)),
    };
    let result = bucket_within(&docs, Granularity::Year, &SubgroupKey::Subgroup, &window);

    assert_eq!(result.out_of_window, 3);
    assert_eq!(result.accepted, 2);
    assert_eq!(result.rejected(), 2);
}

#[test]
fn subgroups_can_come_from_metadata() {
    let docs = vec![
        Document::new("a", "HBM", "2021-01-01", "Samsung").with_metadata("source", "news"),
        Document::new("b", "HBM", "2021-01-02", "Samsung").with_metadata("source", "ir"),
        Document::new("c", "HBM", "2021-01-03", "Samsung"),
    ];
    let key: SubgroupKey = "meta:source".parse().unwrap();
    let result = bucket(&docs, Granularity::Year, &key);

    let subgroups: Vec<&Subgroup> = result.subgroups().into_iter().collect();
    assert_eq!(
        subgroups,
        vec![
            &Subgroup::Named("ir".to_string()),
            &Subgroup::Named("news".to_string()),
        ]
    );
    assert_eq!(result.buckets[&Bucket::all(Period::Year(2021))].len(), 3);
}

#[test]
fn scope_selects_one_partition() {
    let docs = corpus();
    let result = bucket(&docs, Granularity::Year, &SubgroupKey::Subgroup);
    let samsung = result.scope(&Subgroup::Named("Samsung".to_string()));
    let periods: Vec<Period> = samsung.keys().map(|b| b.period).collect();
    assert_eq!(periods, vec![Period::Year(2013), Period::Year(2021), Period::Year(2022)]);
}
