use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod affiliation;
mod cli;
mod config;
mod error;
mod export;
mod openreview;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may come from a local .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing - debug logs only with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("openreview_export=debug")
    } else {
        EnvFilter::new("openreview_export=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export(args) => cli::export::execute(args).await,
        Commands::Resolve(args) => cli::resolve::execute(args),
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
