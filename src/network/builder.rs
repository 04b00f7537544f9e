// NetworkBuilder: per-bucket keyword co-occurrence counting.
//
// Each document contributes +1 to every unordered pair of the keywords it
// mentions. Pairs are keyed by (lower id, higher id) in a BTreeMap, so the
// result never depends on hash iteration order. Pairs under the threshold
// are counted but dropped before the network is materialized.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::graph::{DocumentCounts, Edge, Node, PeriodNetwork};
use crate::corpus::document::Document;
use crate::error::ConfigError;
use crate::keywords::traits::KeywordMatcher;
use crate::keywords::vocabulary::{KeywordId, Vocabulary};

/// Minimum co-occurrence count for an edge to be kept. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MinEdgeWeight(u32);

impl MinEdgeWeight {
    pub fn new(value: i64) -> Result<Self, ConfigError> {
        if value < 1 {
            return Err(ConfigError::NonPositiveMinEdgeWeight(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ConfigError::MinEdgeWeightTooLarge(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for MinEdgeWeight {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for MinEdgeWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds PeriodNetworks from bucket documents against one vocabulary.
#[derive(Clone, Copy)]
pub struct NetworkBuilder<'a> {
    vocabulary: &'a Vocabulary,
    matcher: &'a dyn KeywordMatcher,
    min_edge_weight: MinEdgeWeight,
}

impl<'a> NetworkBuilder<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        matcher: &'a dyn KeywordMatcher,
        min_edge_weight: MinEdgeWeight,
    ) -> Self {
        Self {
            vocabulary,
            matcher,
            min_edge_weight,
        }
    }

    /// Same vocabulary and matcher, different threshold.
    pub fn with_min_edge_weight(self, min_edge_weight: MinEdgeWeight) -> Self {
        Self {
            min_edge_weight,
            ..self
        }
    }

    /// Count raw co-occurrences for a bucket, before thresholding.
    pub fn count_pairs(
        &self,
        documents: &[&Document],
    ) -> (BTreeMap<(KeywordId, KeywordId), u32>, DocumentCounts) {
        let mut pairs: BTreeMap<(KeywordId, KeywordId), u32> = BTreeMap::new();
        let mut counts = DocumentCounts {
            documents: documents.len(),
            ..DocumentCounts::default()
        };

        for document in documents {
            let keywords = self
                .matcher
                .extract_opt(document.text.as_deref(), self.vocabulary);

            counts.keyword_mentions += keywords.len();
            if !keywords.is_empty() {
                counts.with_keywords += 1;
            }
            if keywords.len() < 2 {
                continue;
            }
            counts.with_pairs += 1;

            // BTreeSet iterates ascending, so (a, b) already has a < b
            let ids: Vec<KeywordId> = keywords.into_iter().collect();
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    *pairs.entry((a, b)).or_insert(0) += 1;
                }
            }
        }

        (pairs, counts)
    }

    /// Build the thresholded network for one bucket's documents.
    pub fn build(&self, documents: &[&Document]) -> PeriodNetwork {
        let (pairs, counts) = self.count_pairs(documents);
        let threshold = self.min_edge_weight.get();

        let kept: Vec<((KeywordId, KeywordId), u32)> = pairs
            .into_iter()
            .filter(|&(_, weight)| weight >= threshold)
            .collect();

        let node_ids: BTreeSet<KeywordId> = kept.iter().flat_map(|&((a, b), _)| [a, b]).collect();
        let index: BTreeMap<KeywordId, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        let nodes: Vec<Node> = node_ids
            .iter()
            .map(|&id| Node {
                keyword: id,
                term: self.vocabulary.term(id).to_string(),
            })
            .collect();

        let edges: Vec<Edge> = kept
            .iter()
            .map(|&((a, b), weight)| Edge {
                a: index[&a],
                b: index[&b],
                weight,
            })
            .collect();

        debug!(
            documents = counts.documents,
            with_pairs = counts.with_pairs,
            nodes = nodes.len(),
            edges = edges.len(),
            min_edge_weight = threshold,
            "Built period network"
        );

        PeriodNetwork::from_parts(nodes, edges, counts)
    }
}
