// Unit tests for per-bucket network construction.
//
// Exercises NetworkBuilder through its public API: the three-document
// scenario, single-document buckets, threshold behavior, and the
// determinism/order-independence guarantees of co-occurrence counting.

use trendnet::centrality::tracker::node_centrality;
use trendnet::corpus::document::Document;
use trendnet::keywords::substring::SubstringMatcher;
use trendnet::keywords::vocabulary::Vocabulary;
use trendnet::network::builder::{MinEdgeWeight, NetworkBuilder};
use trendnet::network::graph::PeriodNetwork;

fn vocab() -> Vocabulary {
    Vocabulary::new(["HBM", "DRAM", "AI", "NAND", "EUV"]).unwrap()
}

fn docs(texts: &[&str]) -> Vec<Document> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Document::new(format!("d{i}"), *t, "2021-06-01", "Samsung"))
        .collect()
}

fn build(vocab: &Vocabulary, docs: &[Document], min_edge_weight: i64) -> PeriodNetwork {
    let refs: Vec<&Document> = docs.iter().collect();
    NetworkBuilder::new(vocab, &SubstringMatcher, MinEdgeWeight::new(min_edge_weight).unwrap())
        .build(&refs)
}

fn sorted_edges(network: &PeriodNetwork) -> Vec<(String, String, u32)> {
    let mut edges: Vec<(String, String, u32)> = network
        .weighted_edges()
        .map(|(a, b, w)| {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            (a.to_string(), b.to_string(), w)
        })
        .collect();
    edges.sort();
    edges
}

const MIXED: &[&str] = &[
    "HBM and DRAM for AI servers",
    "DRAM prices recover",
    "HBM DRAM supply",
    "NAND and DRAM inventories",
    "AI accelerators need HBM",
    "EUV capacity for DRAM",
    "quarterly results",
    "HBM AI DRAM NAND roadmap",
];

// ============================================================
// Scenarios
// ============================================================

#[test]
fn three_document_triangle() {
    let vocab = Vocabulary::new(["HBM", "DRAM", "AI"]).unwrap();
    let docs = docs(&["HBM and DRAM report", "HBM and AI growth", "DRAM and AI demand"]);
    let network = build(&vocab, &docs, 1);

    assert_eq!(network.node_count(), 3);
    assert_eq!(network.edge_count(), 3);
    assert!(network.edges().iter().all(|e| e.weight == 1));
    for centrality in node_centrality(&network) {
        assert_eq!(centrality.weighted_degree, 2);
        assert_eq!(centrality.degree, 2);
    }
}

#[test]
fn single_document_with_three_keywords() {
    let vocab = vocab();
    let docs = docs(&["HBM DRAM AI"]);

    let network = build(&vocab, &docs, 1);
    assert_eq!(network.edge_count(), 3);
    assert_eq!(network.edge_weight("HBM", "DRAM"), Some(1));
    assert_eq!(network.edge_weight("HBM", "AI"), Some(1));
    assert_eq!(network.edge_weight("DRAM", "AI"), Some(1));

    let thresholded = build(&vocab, &docs, 2);
    assert!(thresholded.is_empty());
    assert_eq!(thresholded.edge_count(), 0);
    assert_eq!(thresholded.density(), 0.0);
}

#[test]
fn keywordless_document_adds_nothing_but_is_counted() {
    let vocab = vocab();
    let with = build(&vocab, &docs(&["HBM DRAM", "market outlook"]), 1);
    let without = build(&vocab, &docs(&["HBM DRAM"]), 1);

    assert_eq!(sorted_edges(&with), sorted_edges(&without));
    assert_eq!(with.node_count(), without.node_count());
    assert_eq!(with.counts().documents, 2);
    assert_eq!(with.counts().with_keywords, 1);
}

#[test]
fn single_keyword_documents_do_not_create_nodes() {
    let vocab = vocab();
    let network = build(&vocab, &docs(&["HBM", "DRAM", "AI only"]), 1);
    assert!(network.is_empty());
    assert_eq!(network.counts().with_keywords, 3);
    assert_eq!(network.counts().with_pairs, 0);
}

#[test]
fn threshold_above_every_count_gives_empty_network() {
    let vocab = vocab();
    let network = build(&vocab, &docs(MIXED), 100);
    assert!(network.is_empty());
    assert_eq!(network.counts().documents, MIXED.len());
}

#[test]
fn non_positive_threshold_is_rejected() {
    assert!(MinEdgeWeight::new(0).is_err());
    assert!(MinEdgeWeight::new(-1).is_err());
}

// ============================================================
// Properties
// ============================================================

#[test]
fn repeated_builds_are_identical() {
    let vocab = vocab();
    let docs = docs(MIXED);
    let first = build(&vocab, &docs, 1);
    for _ in 0..5 {
        assert_eq!(build(&vocab, &docs, 1), first);
    }
}

#[test]
fn threshold_is_monotonic() {
    let vocab = vocab();
    let docs = docs(MIXED);
    let mut previous = build(&vocab, &docs, 1);
    for weight in 2..=6 {
        let network = build(&vocab, &docs, weight);
        assert!(network.node_count() <= previous.node_count());
        assert!(network.edge_count() <= previous.edge_count());
        previous = network;
    }
}

#[test]
fn document_order_does_not_change_weights() {
    let vocab = vocab();
    let forward = build(&vocab, &docs(MIXED), 1);

    let mut reversed: Vec<&str> = MIXED.to_vec();
    reversed.reverse();
    let mut rotated: Vec<&str> = MIXED.to_vec();
    rotated.rotate_left(3);

    for permutation in [reversed, rotated] {
        let network = build(&vocab, &docs(&permutation), 1);
        assert_eq!(sorted_edges(&network), sorted_edges(&forward));
    }
}

#[test]
fn edge_weight_is_symmetric() {
    let vocab = vocab();
    let network = build(&vocab, &docs(MIXED), 1);
    for (a, b, w) in network.weighted_edges() {
        assert_eq!(network.edge_weight(a, b), Some(w));
        assert_eq!(network.edge_weight(b, a), Some(w));
    }
    assert_eq!(network.edge_weight("HBM", "DRAM"), Some(3));
}

#[test]
fn density_matches_definition() {
    let vocab = vocab();
    let network = build(&vocab, &docs(MIXED), 2);
    let n = network.node_count() as f64;
    let expected = network.edge_count() as f64 / (n * (n - 1.0) / 2.0);
    assert!((network.density() - expected).abs() < 1e-12);
}
