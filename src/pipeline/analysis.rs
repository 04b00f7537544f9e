// Batch analysis pipeline: documents -> buckets -> networks -> centrality
// -> transitions.
//
// Each stage produces a new value consumed by the next; nothing is mutated
// in place. Bucket networks are independent, so they are built in parallel
// with rayon and collected back into an ordered map, which keeps the output
// identical to a sequential run.

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::centrality::table::CentralityTable;
use crate::centrality::tracker;
use crate::centrality::transition::{find_transition, Transition};
use crate::config::AnalysisConfig;
use crate::corpus::document::Document;
use crate::keywords::traits::KeywordMatcher;
use crate::keywords::vocabulary::Vocabulary;
use crate::network::builder::{MinEdgeWeight, NetworkBuilder};
use crate::network::graph::{NetworkSummary, PeriodNetwork};
use crate::temporal::bucketer::{bucket_within, Bucketing, Rejection};
use crate::temporal::period::{Bucket, Period, Subgroup};

/// Corpus-level counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    /// Every document handed to the pipeline.
    pub documents: usize,
    pub rejected: usize,
    pub out_of_window: usize,
    /// Documents assigned to a bucket.
    pub accepted: usize,
    /// Accepted documents mentioning at least one vocabulary term.
    pub documents_with_keywords: usize,
    pub keyword_mentions: usize,
    pub first_period: Option<Period>,
    pub last_period: Option<Period>,
}

/// Networks, centrality and transitions for one partition of the corpus.
#[derive(Debug, Clone)]
pub struct ScopeAnalysis {
    pub subgroup: Subgroup,
    pub min_edge_weight: MinEdgeWeight,
    pub networks: BTreeMap<Bucket, PeriodNetwork>,
    pub table: CentralityTable,
    pub transitions: Vec<Transition>,
}

impl ScopeAnalysis {
    /// Node/edge counts and density for every bucket, in period order.
    pub fn network_summaries(&self) -> Vec<(Bucket, NetworkSummary)> {
        self.networks
            .iter()
            .map(|(bucket, network)| (bucket.clone(), network.summary()))
            .collect()
    }
}

/// The complete result of a run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub corpus: CorpusStats,
    pub rejections: Vec<Rejection>,
    /// All subgroups together.
    pub aggregate: ScopeAnalysis,
    /// One entry per named subgroup, by name.
    pub subgroups: Vec<ScopeAnalysis>,
}

impl Analysis {
    pub fn subgroup(&self, name: &str) -> Option<&ScopeAnalysis> {
        self.subgroups.iter().find(|s| s.subgroup.label() == name)
    }
}

pub struct Pipeline<'a> {
    vocabulary: &'a Vocabulary,
    matcher: &'a dyn KeywordMatcher,
    config: &'a AnalysisConfig,
    show_progress: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        matcher: &'a dyn KeywordMatcher,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            vocabulary,
            matcher,
            config,
            show_progress: false,
        }
    }

    /// Show a progress bar while bucket networks are built.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn run(&self, documents: &[Document]) -> Analysis {
        let config = self.config;
        let bucketing = bucket_within(
            documents,
            config.granularity,
            &config.subgroup_key,
            &config.window,
        );

        let builder = NetworkBuilder::new(self.vocabulary, self.matcher, config.min_edge_weight);
        let subgroup_builder = builder.with_min_edge_weight(config.subgroup_min_edge_weight);

        let pb = self.progress_bar(bucketing.buckets.len());
        let mut networks: BTreeMap<Bucket, PeriodNetwork> = bucketing
            .buckets
            .par_iter()
            .map(|(bucket, docs)| {
                let network = match bucket.subgroup {
                    Subgroup::All => builder.build(docs),
                    Subgroup::Named(_) => subgroup_builder.build(docs),
                };
                pb.inc(1);
                (bucket.clone(), network)
            })
            .collect();
        pb.finish_and_clear();

        info!(
            networks = networks.len(),
            non_empty = networks.values().filter(|n| !n.is_empty()).count(),
            "Built bucket networks"
        );

        // Split the flat map into one scope per subgroup
        let mut scoped: BTreeMap<Subgroup, BTreeMap<Bucket, PeriodNetwork>> = BTreeMap::new();
        while let Some((bucket, network)) = networks.pop_first() {
            scoped
                .entry(bucket.subgroup.clone())
                .or_default()
                .insert(bucket, network);
        }

        let aggregate_networks = scoped.remove(&Subgroup::All).unwrap_or_default();
        let corpus = corpus_stats(documents.len(), &bucketing, &aggregate_networks);

        let aggregate =
            self.analyze_scope(Subgroup::All, config.min_edge_weight, aggregate_networks);
        let subgroups: Vec<ScopeAnalysis> = scoped
            .into_iter()
            .map(|(subgroup, networks)| {
                self.analyze_scope(subgroup, config.subgroup_min_edge_weight, networks)
            })
            .collect();

        info!(
            documents = corpus.documents,
            accepted = corpus.accepted,
            with_keywords = corpus.documents_with_keywords,
            subgroups = subgroups.len(),
            "Analysis complete"
        );

        Analysis {
            corpus,
            rejections: bucketing.rejections,
            aggregate,
            subgroups,
        }
    }

    fn analyze_scope(
        &self,
        subgroup: Subgroup,
        min_edge_weight: MinEdgeWeight,
        networks: BTreeMap<Bucket, PeriodNetwork>,
    ) -> ScopeAnalysis {
        let table = tracker::track(&networks);
        let transitions: Vec<Transition> = self
            .config
            .transitions
            .iter()
            .map(|(legacy, emerging)| find_transition(&table, legacy, emerging))
            .collect();

        for transition in &transitions {
            match transition.bucket() {
                Some(bucket) => info!(
                    scope = %subgroup,
                    legacy = %transition.legacy,
                    emerging = %transition.emerging,
                    bucket = %bucket,
                    "Topic transition"
                ),
                None => info!(
                    scope = %subgroup,
                    legacy = %transition.legacy,
                    emerging = %transition.emerging,
                    "No topic transition"
                ),
            }
        }

        ScopeAnalysis {
            subgroup,
            min_edge_weight,
            networks,
            table,
            transitions,
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  Networks [{bar:30}] {pos}/{len} ({eta})")
        {
            pb.set_style(style);
        }
        pb
    }
}

fn corpus_stats(
    documents: usize,
    bucketing: &Bucketing<'_>,
    aggregate: &BTreeMap<Bucket, PeriodNetwork>,
) -> CorpusStats {
    // every accepted document sits in exactly one aggregate bucket
    let (documents_with_keywords, keyword_mentions) = aggregate
        .values()
        .map(|n| n.counts())
        .fold((0, 0), |(with, mentions), c| {
            (with + c.with_keywords, mentions + c.keyword_mentions)
        });

    CorpusStats {
        documents,
        rejected: bucketing.rejected(),
        out_of_window: bucketing.out_of_window,
        accepted: bucketing.accepted,
        documents_with_keywords,
        keyword_mentions,
        first_period: aggregate.keys().next().map(|b| b.period),
        last_period: aggregate.keys().next_back().map(|b| b.period),
    }
}
