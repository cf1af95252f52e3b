// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pagebot CLI - metadata, conformance and accessibility checks for web pages

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pagebot::config::{self, Config};
use pagebot::report::{generate_report, OutputFormat};
use pagebot::Orchestrator;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate public web pages for metadata, HTML conformance and accessibility
#[derive(Parser)]
#[command(name = "pagebot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and validate URLs (the configured list when none are given)
    Validate {
        /// URLs to validate
        urls: Vec<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip the external HTML conformance check
        #[arg(long)]
        no_conformance: bool,

        /// Number of URLs validated at the same time
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Validate a local HTML file
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// URL the file is published at
        #[arg(long)]
        base_url: Option<String>,

        /// Also post the markup to the conformance checker
        #[arg(long)]
        conformance: bool,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pagebot=debug" } else { "pagebot=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Validate { urls, format, output, no_conformance, concurrency } => {
            let mut config = config::load_config(&config_path)
                .with_context(|| format!("loading {}", config_path.display()))?;
            if no_conformance {
                config.conformance.enabled = false;
            }
            if let Some(n) = concurrency {
                config.concurrency = n;
            }

            let urls = if urls.is_empty() { config.urls.clone() } else { urls };
            anyhow::ensure!(!urls.is_empty(), "no URLs given and none configured");

            let orchestrator = Orchestrator::new(&config)?;
            let results = orchestrator.validate_all(&urls).await;
            info!("Validated {} URL(s)", results.len());

            let report = generate_report(&results, format.into());
            write_output(&report, output.as_deref())?;

            if results.values().any(|r| r.blocks()) {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, base_url, conformance, format } => {
            let config = config::load_config(&config_path)
                .with_context(|| format!("loading {}", config_path.display()))?;
            let markup = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let url = match base_url {
                Some(url) => url,
                None => file_url(&file),
            };

            let mut orchestrator = Orchestrator::new(&config)?;
            if !conformance {
                orchestrator = orchestrator.without_conformance();
            }
            let report = orchestrator.validate_markup(&url, &markup).await;
            let blocks = report.blocks();

            let results = BTreeMap::from([(url, report)]);
            println!("{}", generate_report(&results, format.into()));

            if blocks {
                std::process::exit(1);
            }
        }

        Commands::Init { force } => {
            anyhow::ensure!(
                force || !config_path.exists(),
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
            config::write_default_config(&config_path)?;
            eprintln!("Configuration written to {}", config_path.display());
        }

        Commands::Show => {
            let config = config::load_config(&config_path)
                .with_context(|| format!("loading {}", config_path.display()))?;
            print!("{}", show_config(&config)?);
        }
    }

    Ok(())
}

fn file_url(file: &Path) -> String {
    std::fs::canonicalize(file)
        .ok()
        .and_then(|p| url::Url::from_file_path(p).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| "about:blank".to_string())
}

fn show_config(config: &Config) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
