//! CLI command definitions and handlers

mod assess;
mod compare;
mod init;

use crate::batch::BatchRunner;
use crate::config::{load_config_file, load_project_config, CredenceConfig};
use crate::fingerprint::OrganizerRegistry;
use crate::pipeline::{Assessor, VenueInput};
use crate::reporters::OutputFormat;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Credence - credibility and risk scoring for academic venues
#[derive(Parser, Debug)]
#[command(name = "credence")]
#[command(
    version,
    about = "Score the credibility of academic conferences and journals",
    long_about = "Credence fuses call-for-papers signals, venue fingerprints and citation-graph \
behaviour into one explainable credibility assessment per venue.\n\n\
Input is JSON produced by your parsing and scraping tools: one venue object, or an array.",
    after_help = "\
Examples:
  credence assess venues.json                   Assess every venue in the file
  credence assess venues.json --format json     JSON output for scripting
  credence assess venues.json --fail-on high    Exit code 1 if any venue is high risk or worse
  credence compare venues.json                  Rank venues and summarize
  credence init                                 Write an example credence.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64, default: config or auto-detect)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Explicit config file (TOML, or JSON by extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON array of organizer names seen on previously assessed venues
    #[arg(long, global = true)]
    pub organizers: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a credence.toml with the default settings
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing credence.toml
        #[arg(long)]
        force: bool,
    },

    /// Assess one or more venues
    Assess {
        /// JSON file with one venue input or an array of them
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Exit with code 1 if any venue reaches this risk level
        #[arg(long, value_parser = ["critical", "high", "medium", "low"])]
        fail_on: Option<String>,
    },

    /// Assess venues and rank them against each other
    Compare {
        /// JSON file with an array of venue inputs
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Init { path, force } => init::run(path, *force),
        Commands::Assess {
            input,
            format,
            fail_on,
        } => {
            let ctx = CommandContext::new(&cli, format.as_deref())?;
            assess::run(&ctx, input, fail_on.as_deref())
        }
        Commands::Compare { input, format } => {
            let ctx = CommandContext::new(&cli, format.as_deref())?;
            compare::run(&ctx, input)
        }
    }
}

/// Everything an assessing command needs, resolved from flags and config
pub(crate) struct CommandContext {
    pub runner: BatchRunner,
    pub format: OutputFormat,
}

impl CommandContext {
    fn new(cli: &Cli, format: Option<&str>) -> Result<Self> {
        let config = load_config(cli.config.as_deref())?;

        let format = match format.or(config.defaults.format.as_deref()) {
            Some(f) => OutputFormat::from_str(f)?,
            None => OutputFormat::default(),
        };
        let workers = resolve_workers(cli.workers, config.defaults.workers)?;

        let mut assessor = Assessor::new(&config).context("Invalid scoring configuration")?;
        if let Some(path) = &cli.organizers {
            let registry = OrganizerRegistry::from_json_file(path)
                .with_context(|| format!("Failed to load organizers from {}", path.display()))?;
            debug!("Loaded {} known organizers", registry.len());
            assessor = assessor.with_registry(Arc::new(registry));
        }

        Ok(Self {
            runner: BatchRunner::new(assessor, workers),
            format,
        })
    }
}

/// Worker count from the flag, else the config default, else 0 (auto-detect).
/// Config values go through the same 1-64 bound as the flag.
fn resolve_workers(flag: Option<usize>, configured: Option<usize>) -> Result<usize> {
    if let Some(n) = flag {
        return Ok(n);
    }
    match configured {
        Some(n) => parse_workers(&n.to_string())
            .map_err(|e| anyhow::anyhow!("Invalid [defaults].workers in config: {e}")),
        None => Ok(0),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<CredenceConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Cannot read working directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    Many(Vec<VenueInput>),
    One(Box<VenueInput>),
}

/// Read venue inputs: a single object or an array
pub(crate) fn read_inputs(path: &Path) -> Result<Vec<VenueInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: InputFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse venue input {}", path.display()))?;
    Ok(match parsed {
        InputFile::Many(inputs) => inputs,
        InputFile::One(input) => vec![*input],
    })
}
