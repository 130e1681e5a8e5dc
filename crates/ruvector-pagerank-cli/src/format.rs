//! Output formatting utilities

use colored::*;
use ruvector_pagerank::compare::Agreement;
use ruvector_pagerank::config::RankConfig;
use ruvector_pagerank::pipeline::{GraphSummary, RankReport, RankedNode};
use serde::Serialize;

/// Format the top of a ranking and the cross-check verdict.
pub fn format_ranking(report: &RankReport, top_k: usize) -> String {
    let mut output = String::new();
    let top = report.top_k(top_k);

    output.push_str(&format!(
        "\n{} ({} of {} nodes)\n",
        "Top PageRank".bold().green(),
        top.len(),
        report.node_count()
    ));
    let width = top
        .iter()
        .map(|n| n.label.chars().count())
        .max()
        .unwrap_or(0);
    for node in &top {
        output.push_str(&format!(
            "{:>4}. {:<width$}  {}\n",
            node.rank,
            node.label.bold(),
            format!("{:.6}", node.score).cyan(),
        ));
    }

    output.push_str(&format!(
        "\n  Power iterations: {}\n  Final relative change: {:.3e}\n  Stationary eigenvalues: {}\n  Max deviation: {:.3e}\n",
        report.power.iterations.to_string().cyan(),
        report.power.residual,
        report.eigen.candidate_count().to_string().cyan(),
        report.agreement.max_abs_diff,
    ));
    output.push_str(&format!("\n{}\n", format_agreement(&report.agreement)));
    output
}

/// The final verdict line.
pub fn format_agreement(agreement: &Agreement) -> String {
    let verdict = if agreement.agree {
        agreement.to_string().green().bold()
    } else {
        agreement.to_string().red().bold()
    };
    format!("Pagerank computations via power method and eigendecomposition {verdict}")
}

/// Format graph statistics
pub fn format_summary(summary: &GraphSummary) -> String {
    format!(
        "\n{}\n  Nodes: {}\n  Edges: {}\n  Distinct links: {}\n  Dangling nodes: {}\n  Self-loops: {}\n",
        "Graph Statistics".bold().green(),
        summary.nodes.to_string().cyan(),
        summary.edges.to_string().cyan(),
        summary.links.to_string().cyan(),
        summary.dangling.to_string().cyan(),
        summary.self_loops.to_string().cyan(),
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a RankConfig,
    nodes: usize,
    links: usize,
    dangling: &'a [usize],
    iterations: usize,
    relative_change: f64,
    stationary_eigenvalues: usize,
    agreement: &'a Agreement,
    top: Vec<RankedNode>,
    power: &'a [f64],
    eigen: &'a [f64],
}

/// Serialize a ranking as pretty JSON.
pub fn format_ranking_json(report: &RankReport, top_k: usize) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        config: &report.config,
        nodes: report.node_count(),
        links: report.link_count,
        dangling: &report.dangling,
        iterations: report.power.iterations,
        relative_change: report.power.residual,
        stationary_eigenvalues: report.eigen.candidate_count(),
        agreement: &report.agreement,
        top: report.top_k(top_k),
        power: report.power.distribution.as_slice(),
        eigen: report.eigen.distribution.as_slice(),
    })
}

/// Format error message
pub fn format_error(msg: &str) -> String {
    format!("{} {}", "Error:".red().bold(), msg)
}
