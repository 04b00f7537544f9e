// JSON export of a finished analysis.
//
// Network maps are keyed by Bucket, which serde_json can't use as an object
// key, so the export flattens them into lists of rows.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::centrality::table::CentralityRecord;
use crate::centrality::transition::Transition;
use crate::centrality::trends::{
    centrality_matrix, dense_series, emerging_keywords, CentralityMatrix, Emergence,
};
use crate::network::graph::NetworkSummary;
use crate::pipeline::analysis::{Analysis, CorpusStats, ScopeAnalysis};
use crate::temporal::bucketer::Rejection;
use crate::temporal::period::Bucket;

#[derive(Debug, Serialize)]
pub struct NetworkRow<'a> {
    pub bucket: Bucket,
    #[serde(flatten)]
    pub summary: NetworkSummary,
    /// Thresholded edges as (keyword, keyword, weight).
    pub edges: Vec<(&'a str, &'a str, u32)>,
}

/// Zero-filled weighted-degree series of a keyword named in a transition.
#[derive(Debug, Serialize)]
pub struct TrackedSeries<'a> {
    pub keyword: &'a str,
    pub points: Vec<(Bucket, u64)>,
}

#[derive(Debug, Serialize)]
pub struct ScopeExport<'a> {
    pub subgroup: &'a str,
    pub min_edge_weight: u32,
    pub networks: Vec<NetworkRow<'a>>,
    pub centrality: &'a [CentralityRecord],
    pub transitions: &'a [Transition],
    pub tracked: Vec<TrackedSeries<'a>>,
    pub emerging: Vec<Emergence>,
    pub matrix: CentralityMatrix,
}

#[derive(Debug, Serialize)]
pub struct AnalysisExport<'a> {
    pub corpus: &'a CorpusStats,
    pub rejections: &'a [Rejection],
    pub aggregate: ScopeExport<'a>,
    pub subgroups: Vec<ScopeExport<'a>>,
}

impl<'a> AnalysisExport<'a> {
    /// `matrix_top` bounds the rows of each scope's centrality matrix.
    pub fn new(analysis: &'a Analysis, matrix_top: usize) -> Self {
        Self {
            corpus: &analysis.corpus,
            rejections: &analysis.rejections,
            aggregate: ScopeExport::new(&analysis.aggregate, matrix_top),
            subgroups: analysis
                .subgroups
                .iter()
                .map(|scope| ScopeExport::new(scope, matrix_top))
                .collect(),
        }
    }
}

impl<'a> ScopeExport<'a> {
    fn new(scope: &'a ScopeAnalysis, matrix_top: usize) -> Self {
        let networks = scope
            .networks
            .iter()
            .map(|(bucket, network)| NetworkRow {
                bucket: bucket.clone(),
                summary: network.summary(),
                edges: network.weighted_edges().collect(),
            })
            .collect();

        let mut keywords: Vec<&str> = scope
            .transitions
            .iter()
            .flat_map(|t| [t.legacy.as_str(), t.emerging.as_str()])
            .collect();
        keywords.sort_unstable();
        keywords.dedup();
        let tracked = keywords
            .into_iter()
            .map(|keyword| TrackedSeries {
                keyword,
                points: dense_series(&scope.table, keyword),
            })
            .collect();

        Self {
            subgroup: scope.subgroup.label(),
            min_edge_weight: scope.min_edge_weight.get(),
            networks,
            centrality: scope.table.records(),
            transitions: &scope.transitions,
            tracked,
            emerging: emerging_keywords(&scope.table),
            matrix: centrality_matrix(&scope.table, matrix_top),
        }
    }
}

pub fn to_json_string(analysis: &Analysis, matrix_top: usize) -> Result<String> {
    serde_json::to_string_pretty(&AnalysisExport::new(analysis, matrix_top))
        .context("Failed to serialize analysis")
}

/// Write the analysis as pretty-printed JSON.
pub fn write_json(analysis: &Analysis, matrix_top: usize, path: &Path) -> Result<()> {
    let json = to_json_string(analysis, matrix_top)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write JSON export to {}", path.display()))?;
    Ok(())
}
