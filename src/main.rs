//! Command-line front end printing the gathered file set as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;

use elm_file_gatherer::{DependencyFileSet, FileGatherer, GathererConfig, ResolvedFileSet};

#[derive(Parser)]
#[command(name = "elm-gatherer")]
#[command(about = "List the source files of an Elm project")]
#[command(version)]
struct Cli {
    /// Project directory containing the manifest
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Also list the exposed module files of every pinned dependency
    #[arg(short, long)]
    dependencies: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct ProjectReport {
    project: ResolvedFileSet,
    dependencies: Vec<DependencyFileSet>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => GathererConfig::from_path(path)
            .ok_or_else(|| anyhow!("failed to load configuration from {}", path.display()))?,
        None => GathererConfig::discover(&cli.directory),
    };
    let gatherer = FileGatherer::new(config);

    let project = gatherer
        .gather(&cli.directory)
        .with_context(|| format!("failed to gather {}", cli.directory.display()))?;

    let output = if cli.dependencies {
        let dependencies = gatherer
            .gather_dependencies(&cli.directory)
            .context("failed to resolve dependencies")?;
        serde_json::to_string_pretty(&ProjectReport {
            project,
            dependencies,
        })?
    } else {
        serde_json::to_string_pretty(&project)?
    };

    println!("{output}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("{}={level}", env!("CARGO_PKG_NAME")))
        .with_writer(std::io::stderr)
        .init();
}
