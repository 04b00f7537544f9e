use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use trendnet::config::{parse_transition_pair, parse_window_bound, Settings};
use trendnet::corpus::document::Document;
use trendnet::corpus::loader::load_json_lines;
use trendnet::keywords::presets;
use trendnet::keywords::substring::SubstringMatcher;
use trendnet::keywords::vocabulary::Vocabulary;
use trendnet::output::{json, terminal};
use trendnet::pipeline::analysis::Pipeline;
use trendnet::temporal::bucketer::DateWindow;

/// Trendnet: keyword co-occurrence networks over time.
///
/// Buckets a dated, labelled corpus into periods, builds one keyword
/// network per bucket, and tracks how central each keyword is over time.
#[derive(Parser)]
#[command(name = "trendnet", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build period networks and report centrality trends
    Analyze {
        /// JSON Lines document file, optionally as LABEL=PATH to tag every
        /// record with a subgroup (repeatable)
        #[arg(long = "documents", required = true)]
        documents: Vec<String>,

        /// Vocabulary file, one term per line (default: built-in preset)
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Period granularity: year, quarter or month
        #[arg(long)]
        granularity: Option<String>,

        /// Minimum co-occurrence count for aggregate network edges
        #[arg(long)]
        min_edge_weight: Option<i64>,

        /// Minimum co-occurrence count for per-subgroup network edges
        #[arg(long)]
        subgroup_min_edge_weight: Option<i64>,

        /// Subgroup selector: `subgroup` or `meta:<field>`
        #[arg(long)]
        subgroup_key: Option<String>,

        /// Earliest date to include (year or date)
        #[arg(long)]
        from: Option<String>,

        /// Latest date to include (year or date)
        #[arg(long)]
        to: Option<String>,

        /// Keyword pair to check for a crossing, as LEGACY:EMERGING (repeatable)
        #[arg(long = "transition")]
        transitions: Vec<String>,

        /// Number of keywords per ranking in the report (default: 5)
        #[arg(long, default_value = "5")]
        top: usize,

        /// Also write the full analysis as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Validate and print the vocabulary in use
    Vocabulary {
        /// Vocabulary file (default: built-in preset)
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trendnet=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();

    match cli.command {
        Commands::Analyze {
            documents,
            vocabulary,
            granularity,
            min_edge_weight,
            subgroup_min_edge_weight,
            subgroup_key,
            from,
            to,
            transitions,
            top,
            json: json_path,
        } => {
            // Flags override the environment
            if vocabulary.is_some() {
                settings.vocabulary_path = vocabulary;
            }
            if granularity.is_some() {
                settings.granularity = granularity;
            }
            if let Some(weight) = min_edge_weight {
                settings.min_edge_weight = Some(weight.to_string());
            }
            if let Some(weight) = subgroup_min_edge_weight {
                settings.subgroup_min_edge_weight = Some(weight.to_string());
            }
            if subgroup_key.is_some() {
                settings.subgroup_key = subgroup_key;
            }

            let window = DateWindow {
                start: from.as_deref().map(|raw| parse_window_bound(raw, false)).transpose()?,
                end: to.as_deref().map(|raw| parse_window_bound(raw, true)).transpose()?,
            };

            // Validate everything before touching the corpus
            let vocabulary = load_vocabulary(settings.vocabulary_path.as_deref())?;
            let pairs = transitions
                .iter()
                .map(|raw| parse_transition_pair(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let config = settings
                .resolve(window)?
                .with_transitions(pairs, &vocabulary)?;

            info!(
                granularity = %config.granularity,
                min_edge_weight = %config.min_edge_weight,
                subgroup_min_edge_weight = %config.subgroup_min_edge_weight,
                keywords = vocabulary.len(),
                "Configuration resolved"
            );

            let corpus = load_documents(&documents)?;
            println!(
                "Analyzing {} documents against {} keywords...",
                corpus.len(),
                vocabulary.len()
            );

            let analysis = Pipeline::new(&vocabulary, &SubstringMatcher, &config)
                .with_progress(true)
                .run(&corpus);

            terminal::display_report(&analysis, top);

            if let Some(path) = json_path {
                json::write_json(&analysis, top.max(20), &path)?;
                println!("{} {}", "JSON written to".bold(), path.display());
            }
        }

        Commands::Vocabulary { vocabulary } => {
            if vocabulary.is_some() {
                settings.vocabulary_path = vocabulary;
            }
            let source = match &settings.vocabulary_path {
                Some(path) => path.display().to_string(),
                None => "built-in semiconductor preset".to_string(),
            };
            let vocabulary = load_vocabulary(settings.vocabulary_path.as_deref())?;

            println!(
                "\n{}",
                format!("=== Vocabulary ({} terms) ===", vocabulary.len()).bold()
            );
            println!("  {}", source.dimmed());
            println!();
            for (i, term) in vocabulary.terms().enumerate() {
                println!("  {:>3}. {}", i + 1, term);
            }
        }
    }

    Ok(())
}

fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    match path {
        Some(path) => Vocabulary::load(path),
        None => presets::semiconductor().context("built-in vocabulary preset is invalid"),
    }
}

/// Load every `[LABEL=]PATH` argument, in order.
fn load_documents(args: &[String]) -> Result<Vec<Document>> {
    let mut corpus = Vec::new();
    for arg in args {
        let (label, path) = match arg.split_once('=') {
            Some((label, path)) if !label.is_empty() => (Some(label), path),
            _ => (None, arg.as_str()),
        };
        corpus.extend(load_json_lines(Path::new(path), label)?);
    }
    Ok(corpus)
}
