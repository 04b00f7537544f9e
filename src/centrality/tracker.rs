// CentralityTracker: per-node centrality for every bucket's network.
//
// degree_centrality follows the normalized-degree definition
// (degree / (n - 1)); weighted_degree is the sum of incident edge weights
// and is the signal used for trend tracking. Empty networks add no rows.

use std::collections::BTreeMap;

use tracing::info;

use super::table::{CentralityRecord, CentralityTable};
use crate::network::graph::PeriodNetwork;
use crate::temporal::period::Bucket;

/// Centrality of one node, by node index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeCentrality {
    pub degree: usize,
    pub degree_centrality: f64,
    pub weighted_degree: u64,
}

/// Compute centrality for every node of a network, in node order.
pub fn node_centrality(network: &PeriodNetwork) -> Vec<NodeCentrality> {
    let n = network.node_count();
    let mut degree = vec![0usize; n];
    let mut strength = vec![0u64; n];

    for edge in network.edges() {
        degree[edge.a] += 1;
        degree[edge.b] += 1;
        strength[edge.a] += u64::from(edge.weight);
        strength[edge.b] += u64::from(edge.weight);
    }

    let denominator = n.saturating_sub(1);
    degree
        .into_iter()
        .zip(strength)
        .map(|(degree, weighted_degree)| NodeCentrality {
            degree,
            degree_centrality: if denominator == 0 {
                0.0
            } else {
                degree as f64 / denominator as f64
            },
            weighted_degree,
        })
        .collect()
}

/// Assemble the centrality table for a set of bucket networks.
pub fn track(networks: &BTreeMap<Bucket, PeriodNetwork>) -> CentralityTable {
    let mut records = Vec::new();

    for (bucket, network) in networks {
        if network.is_empty() {
            continue;
        }
        for (node, centrality) in network.nodes().iter().zip(node_centrality(network)) {
            records.push(CentralityRecord {
                bucket: bucket.clone(),
                keyword: node.term.clone(),
                degree_centrality: centrality.degree_centrality,
                weighted_degree: centrality.weighted_degree,
            });
        }
    }

    let table = CentralityTable::from_records(records);
    info!(
        networks = networks.len(),
        rows = table.len(),
        "Tracked centrality"
    );
    table
}
