// Colored terminal report for an analysis run.
//
// Everything here reads the finished Analysis; nothing is recomputed
// except the trend queries, which are cheap table scans.

use colored::Colorize;

use crate::centrality::table::CentralityTable;
use crate::centrality::transition::Transition;
use crate::centrality::trends::{emerging_keywords, top_keywords_between};
use crate::pipeline::analysis::{Analysis, CorpusStats, ScopeAnalysis};
use crate::temporal::period::Period;

/// Periods covered by the subgroup leaders section.
const RECENT_PERIODS: usize = 4;

/// A named inclusive period window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Era {
    pub label: &'static str,
    pub from: Period,
    pub to: Period,
}

/// Split ascending periods into up to three contiguous eras (early, middle,
/// recent). Earlier eras take the remainder when the count doesn't divide.
pub fn split_eras(periods: &[Period]) -> Vec<Era> {
    const LABELS: [&str; 3] = ["Early", "Middle", "Recent"];

    let n = periods.len();
    let eras = n.min(LABELS.len());
    if eras == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(eras);
    let mut start = 0;
    for (i, &label) in LABELS.iter().take(eras).enumerate() {
        let size = n / eras + usize::from(i < n % eras);
        let end = start + size - 1;
        out.push(Era {
            label,
            from: periods[start],
            to: periods[end],
        });
        start = end + 1;
    }
    out
}

/// Print the full report: corpus stats, network sizes, era leaders,
/// emerging keywords, transitions, and per-subgroup leaders.
pub fn display_report(analysis: &Analysis, top: usize) {
    display_corpus_stats(&analysis.corpus);
    display_network_table(&analysis.aggregate);
    display_era_leaders(&analysis.aggregate.table, top);
    display_emerging(&analysis.aggregate.table, top);
    display_transitions("all", &analysis.aggregate.transitions);

    if !analysis.subgroups.is_empty() {
        println!(
            "\n{}",
            format!("=== Subgroups ({}) ===", analysis.subgroups.len()).bold()
        );
        for scope in &analysis.subgroups {
            display_subgroup(scope, top);
        }
    }
    println!();
}

pub fn display_corpus_stats(stats: &CorpusStats) {
    println!("\n{}", "=== Corpus ===".bold());
    println!("  Documents:          {}", stats.documents);
    println!("  Accepted:           {}", stats.accepted);
    if stats.rejected > 0 {
        println!("  Rejected:           {}", stats.rejected.to_string().yellow());
    } else {
        println!("  Rejected:           {}", stats.rejected);
    }
    println!("  Outside window:     {}", stats.out_of_window);
    println!("  With keywords:      {}", stats.documents_with_keywords);
    println!("  Keyword mentions:   {}", stats.keyword_mentions);

    match (stats.first_period, stats.last_period) {
        (Some(first), Some(last)) => println!("  Periods:            {first} .. {last}"),
        _ => println!("  Periods:            {}", "none".dimmed()),
    }
}

/// Node/edge counts and density per bucket of a scope.
pub fn display_network_table(scope: &ScopeAnalysis) {
    println!(
        "\n{}",
        format!(
            "=== Networks: {} (min edge weight {}) ===",
            scope.subgroup, scope.min_edge_weight
        )
        .bold()
    );

    if scope.networks.is_empty() {
        println!("  {}", "No buckets.".dimmed());
        return;
    }

    println!(
        "  {:<10} {:>6} {:>6} {:>8} {:>6}  {}",
        "Period".dimmed(),
        "Docs".dimmed(),
        "Nodes".dimmed(),
        "Edges".dimmed(),
        "Density".dimmed(),
        "Leader".dimmed(),
    );
    println!("  {}", "-".repeat(66).dimmed());

    for (bucket, summary) in scope.network_summaries() {
        let leader = match scope.table.top_n(&bucket, 1).first() {
            Some(record) => format!(
                "{} ({})",
                super::truncate_chars(&record.keyword, 16),
                record.weighted_degree
            ),
            None => "-".to_string(),
        };
        let line = format!(
            "  {:<10} {:>6} {:>6} {:>8} {:>7.3}  {}",
            bucket.period.to_string(),
            summary.documents,
            summary.nodes,
            summary.edges,
            summary.density,
            leader,
        );
        if summary.nodes == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{line}");
        }
    }
}

/// Top keywords for each third of the table's periods.
pub fn display_era_leaders(table: &CentralityTable, top: usize) {
    let eras = split_eras(&table.periods());
    if eras.is_empty() {
        return;
    }

    println!("\n{}", "=== Era Leaders ===".bold());
    for era in eras {
        let leaders = top_keywords_between(table, era.from, era.to, top);
        println!(
            "  {} ({} .. {}): {}",
            era.label.cyan(),
            era.from,
            era.to,
            format_ranked(&leaders)
        );
    }
}

/// Keywords that entered the network after the first bucket.
pub fn display_emerging(table: &CentralityTable, top: usize) {
    let emerged = emerging_keywords(table);
    if emerged.is_empty() {
        return;
    }

    println!("\n{}", "=== Emerging Keywords ===".bold());
    for emergence in emerged.iter().take(top) {
        println!(
            "  {:<24} first seen {} (weighted degree {})",
            super::truncate_chars(&emergence.keyword, 20),
            emergence.first_bucket.period.to_string().green(),
            emergence.weighted_degree,
        );
    }
    if emerged.len() > top {
        println!("  {}", format!("... and {} more", emerged.len() - top).dimmed());
    }
}

pub fn display_transitions(scope: &str, transitions: &[Transition]) {
    if transitions.is_empty() {
        return;
    }

    println!("\n{}", format!("=== Transitions: {scope} ===").bold());
    for transition in transitions {
        let pair = format!("{} -> {}", transition.legacy, transition.emerging);
        match &transition.crossing {
            Some(point) => println!(
                "  {:<28} {} ({} > {})",
                pair,
                point.bucket.period.to_string().green().bold(),
                point.emerging,
                point.legacy,
            ),
            None => println!("  {:<28} {}", pair, "no crossing".dimmed()),
        }
    }
}

/// Leaders over the last few periods of one subgroup, plus its transitions.
fn display_subgroup(scope: &ScopeAnalysis, top: usize) {
    let periods = scope.table.periods();
    let label = scope.subgroup.label();

    let recent = &periods[periods.len().saturating_sub(RECENT_PERIODS)..];
    let (Some(&from), Some(&to)) = (recent.first(), recent.last()) else {
        println!("  {:<16} {}", label, "no edges above threshold".dimmed());
        return;
    };

    let leaders = top_keywords_between(&scope.table, from, to, top);
    println!(
        "  {:<16} ({} .. {}): {}",
        label.cyan(),
        from,
        to,
        format_ranked(&leaders)
    );

    for transition in &scope.transitions {
        if let Some(bucket) = transition.bucket() {
            println!(
                "  {:<16} {} -> {} at {}",
                "",
                transition.legacy,
                transition.emerging,
                bucket.period.to_string().green()
            );
        }
    }
}

fn format_ranked(ranked: &[(String, u64)]) -> String {
    if ranked.is_empty() {
        return "-".dimmed().to_string();
    }
    ranked
        .iter()
        .map(|(keyword, total)| format!("{} ({total})", super::truncate_chars(keyword, 20)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years(range: std::ops::RangeInclusive<i32>) -> Vec<Period> {
        range.map(Period::Year).collect()
    }

    #[test]
    fn test_split_eras_eleven_years() {
        let eras = split_eras(&years(2014..=2024));
        assert_eq!(eras.len(), 3);
        assert_eq!((eras[0].from, eras[0].to), (Period::Year(2014), Period::Year(2017)));
        assert_eq!((eras[1].from, eras[1].to), (Period::Year(2018), Period::Year(2021)));
        assert_eq!((eras[2].from, eras[2].to), (Period::Year(2022), Period::Year(2024)));
    }

    #[test]
    fn test_split_eras_short_tables() {
        assert!(split_eras(&[]).is_empty());

        let eras = split_eras(&years(2020..=2021));
        assert_eq!(eras.len(), 2);
        assert_eq!(eras[0].from, eras[0].to);
        assert_eq!(eras[1].label, "Middle");
    }
}
