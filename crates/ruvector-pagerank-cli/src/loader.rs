//! Labels and edge-list file parsing.
//!
//! Both formats are line oriented. Blank lines and lines starting with `#`
//! are skipped. A labels file takes the first whitespace-separated field of
//! each line as the label of the next node index; an edges file holds one
//! `source destination` integer pair per line.

use anyhow::{bail, Context, Result};
use ruvector_pagerank::types::Graph;
use std::path::Path;

/// Non-comment, non-blank lines with their 1-based line numbers.
fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse node labels. `source` names the input in error messages.
pub fn parse_labels(content: &str, source: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = content_lines(content)
        .filter_map(|(_, line)| line.split_whitespace().next())
        .map(str::to_string)
        .collect();
    if labels.is_empty() {
        bail!("{source}: no labels found");
    }
    Ok(labels)
}

/// Parse `source destination` pairs. `source` names the input in error
/// messages.
pub fn parse_edges(content: &str, source: &str) -> Result<Vec<(usize, usize)>> {
    content_lines(content)
        .map(|(lineno, line)| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [src, dst] = fields[..] else {
                bail!(
                    "{source}:{lineno}: expected `source destination`, got {} field(s)",
                    fields.len()
                );
            };
            let parse = |field: &str| {
                field.parse::<usize>().with_context(|| {
                    format!("{source}:{lineno}: `{field}` is not a node index")
                })
            };
            Ok((parse(src)?, parse(dst)?))
        })
        .collect()
}

/// Read both files and assemble a [`Graph`].
pub fn load_graph(labels_path: &Path, edges_path: &Path) -> Result<Graph> {
    let labels_content = std::fs::read_to_string(labels_path)
        .with_context(|| format!("Failed to read labels file {}", labels_path.display()))?;
    let edges_content = std::fs::read_to_string(edges_path)
        .with_context(|| format!("Failed to read edges file {}", edges_path.display()))?;

    let labels = parse_labels(&labels_content, &labels_path.display().to_string())?;
    let edges = parse_edges(&edges_content, &edges_path.display().to_string())?;
    tracing::debug!(nodes = labels.len(), edges = edges.len(), "loaded graph");

    Ok(Graph::new(labels, edges))
}
