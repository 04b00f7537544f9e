// PeriodNetwork: one bucket's weighted, undirected co-occurrence graph.
//
// Nodes live in a dense array in vocabulary order; edges refer to them by
// index with `a < b`. A network is built once, queried, and discarded, so
// there is no mutation API beyond construction.

use serde::Serialize;

use crate::keywords::vocabulary::KeywordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub keyword: KeywordId,
    pub term: String,
}

/// An edge between two node indices. `a < b` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    /// Exact number of documents in the bucket mentioning both endpoints.
    pub weight: u32,
}

/// Document counts behind one network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentCounts {
    /// Every document assigned to the bucket.
    pub documents: usize,
    /// Documents mentioning at least one vocabulary term.
    pub with_keywords: usize,
    /// Documents mentioning two or more terms (the only ones producing pairs).
    pub with_pairs: usize,
    /// Total keyword mentions across the bucket's documents.
    pub keyword_mentions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodNetwork {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    counts: DocumentCounts,
}

/// Node/edge counts and density of one network, for snapshot reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub documents: usize,
    pub documents_with_keywords: usize,
}

impl PeriodNetwork {
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, counts: DocumentCounts) -> Self {
        Self {
            nodes,
            edges,
            counts,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn counts(&self) -> DocumentCounts {
        self.counts
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges over the maximum possible for this node count; 0 below two
    /// nodes.
    pub fn density(&self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        let possible = n * (n - 1) / 2;
        self.edges.len() as f64 / possible as f64
    }

    pub fn node_index(&self, term: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.term == term)
    }

    /// Weight of the edge between two terms, in either order.
    pub fn edge_weight(&self, x: &str, y: &str) -> Option<u32> {
        let i = self.node_index(x)?;
        let j = self.node_index(y)?;
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        self.edges
            .iter()
            .find(|e| e.a == a && e.b == b)
            .map(|e| e.weight)
    }

    /// Edge endpoints as terms, with weights.
    pub fn weighted_edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.edges.iter().map(|e| {
            (
                self.nodes[e.a].term.as_str(),
                self.nodes[e.b].term.as_str(),
                e.weight,
            )
        })
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
            density: self.density(),
            documents: self.counts.documents,
            documents_with_keywords: self.counts.with_keywords,
        }
    }
}
