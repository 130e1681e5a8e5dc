//! ruvector-pagerank - rank the nodes of a labelled edge list

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use ruvector_pagerank::config::RankConfig;
use ruvector_pagerank::pipeline::{rank_graph, summarize};
use std::path::PathBuf;

mod config;
mod format;
mod loader;

use crate::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "ruvector-pagerank")]
#[command(about = "PageRank by power iteration, cross-checked by eigendecomposition", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Disable colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the nodes of a graph
    Rank {
        #[command(flatten)]
        input: InputArgs,

        /// Damping factor in (0, 1)
        #[arg(long)]
        alpha: Option<f64>,

        /// Power-iteration stopping tolerance
        #[arg(long)]
        tolerance: Option<f64>,

        /// Maximum |lambda - 1| for a stationary eigenvalue
        #[arg(long)]
        eigen_tolerance: Option<f64>,

        /// Power-iteration cap
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Number of top nodes to print
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show graph statistics
    Info {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Node labels file, one label per line
    #[arg(short, long)]
    labels: PathBuf,

    /// Edge list file, one `source destination` pair per line
    #[arg(short, long)]
    edges: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter("ruvector_pagerank=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Disable colors if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = Config::load(cli.config).and_then(|config| run(cli.command, config));

    // Handle errors
    if let Err(e) = result {
        eprintln!("{}", format::format_error(&format!("{e:#}")));
        if cli.debug {
            eprintln!("\n{:#?}", e);
        } else {
            eprintln!("\n{}", "Run with --debug for more details".dimmed());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            input,
            alpha,
            tolerance,
            eigen_tolerance,
            max_iterations,
            top_k,
            format,
        } => {
            let rank = RankConfig {
                alpha: alpha.unwrap_or(config.rank.alpha),
                tolerance: tolerance.unwrap_or(config.rank.tolerance),
                eigen_tolerance: eigen_tolerance.unwrap_or(config.rank.eigen_tolerance),
                max_iterations: max_iterations.unwrap_or(config.rank.max_iterations),
            };
            let top_k = top_k.unwrap_or(config.output.top_k);
            let format = format.unwrap_or(config.output.format);
            rank_command(&input, &rank, top_k, format)
        }
        Commands::Info { input } => {
            let graph = loader::load_graph(&input.labels, &input.edges)?;
            let summary = summarize(&graph)?;
            println!("{}", format::format_summary(&summary));
            Ok(())
        }
    }
}

fn rank_command(input: &InputArgs, rank: &RankConfig, top_k: usize, format: OutputFormat) -> Result<()> {
    let graph = loader::load_graph(&input.labels, &input.edges)?;
    let report = rank_graph(&graph, rank)?;

    match format {
        OutputFormat::Text => print!("{}", format::format_ranking(&report, top_k)),
        OutputFormat::Json => println!("{}", format::format_ranking_json(&report, top_k)?),
    }
    Ok(())
}
