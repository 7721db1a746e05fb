use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use tangle::config;
use tangle::core::ScanCoordinator;
use tangle::export;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "tangle",
    version = "0.1.0",
    author = "tangle developers",
    about = "Cross-language project dependency graph extractor"
)]
struct Cli {
    /// Project directory to scan
    #[arg(value_name = "PATH")]
    project_path: PathBuf,

    /// Output file for the graph JSON
    #[arg(short, long, value_name = "FILE", default_value = "dependencies.json")]
    output: PathBuf,

    /// Additional directory names to exclude
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Worker pool size (defaults to the number of logical CPUs)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    info!(root = %cli.project_path.display(), "loading project configuration");
    let aliases = config::load_aliases(&cli.project_path);
    if !aliases.is_empty() {
        info!(aliases = aliases.len(), "alias table ready");
    }

    let coordinator =
        ScanCoordinator::new(cli.exclude.iter().cloned()).with_progress(!cli.no_progress);
    let outcome = coordinator.scan(&cli.project_path, &aliases)?;

    let stats = outcome.stats;
    println!(
        "Processed {} files, found {} dependencies ({} errors, {} warnings, {} skipped)",
        stats.files_processed,
        stats.dependencies_found,
        stats.errors,
        stats.warnings,
        stats.skipped
    );

    // Per-file errors are non-fatal; an empty graph is the failure signal.
    if outcome.graph.is_empty() {
        bail!("no dependencies found to visualize");
    }

    export::write_json(&outcome.graph, &cli.output)?;
    println!(
        "Graph with {} nodes and {} edges written to {}",
        outcome.graph.node_count(),
        outcome.graph.edge_count(),
        cli.output.display()
    );
    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
