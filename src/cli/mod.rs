pub mod export;
pub mod resolve;
pub mod schema;

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "openreview-export")]
#[command(
    author,
    version,
    about = "Export OpenReview submissions with author affiliations to CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch accepted submissions and write them to CSV
    Export(ExportArgs),

    /// Resolve affiliations from a saved profile JSON file
    Resolve(ResolveArgs),

    /// Print JSON Schema for config validation
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct ExportArgs {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override submission invitation
    #[arg(long)]
    pub invitation: Option<String>,

    /// Override venue id filter
    #[arg(long)]
    pub venue_id: Option<String>,

    /// Override rows written per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Override first year of the affiliation window
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Last year of the affiliation window (open-ended if omitted)
    #[arg(long, conflicts_with = "open_ended")]
    pub end_year: Option<i32>,

    /// Clear any configured end year so the window is open-ended
    #[arg(long)]
    pub open_ended: bool,

    /// Override max concurrent profile lookups
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// OpenReview username
    #[arg(long, env = "OPEN_REVIEW_USERNAME")]
    pub username: Option<String>,

    /// OpenReview password
    #[arg(long, env = "OPEN_REVIEW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Show plan without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone)]
pub struct ResolveArgs {
    /// Profile JSON: a profile object, a /profiles response, or a bare history list
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// First year of the window
    #[arg(long, default_value_t = 2025)]
    pub start_year: i32,

    /// Last year of the window (open-ended if omitted)
    #[arg(long)]
    pub end_year: Option<i32>,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
