use crate::cli::ExportArgs;
use crate::config::{Config, Credentials};
use crate::export::Exporter;
use crate::openreview::OpenReviewClient;
use std::time::Duration;
use tracing::{info, warn};

pub async fn execute(args: ExportArgs) -> anyhow::Result<()> {
    // Load and validate config
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(invitation) = args.invitation {
        config.venue.invitation = invitation;
    }
    if let Some(venue_id) = args.venue_id {
        config.venue.venue_id = venue_id;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(start_year) = args.start_year {
        config.window.start_year = start_year;
    }
    if args.open_ended {
        config.window.end_year = None;
    } else if args.end_year.is_some() {
        config.window.end_year = args.end_year;
    }

    config.validate()?;

    let credentials = Credentials::from_parts(args.username, args.password);

    if args.dry_run {
        info!("DRY RUN - no requests will be made");
        print_export_plan(&config, credentials.as_ref());
        return Ok(());
    }

    let client = OpenReviewClient::connect(
        &config.base_url,
        Duration::from_secs(config.timeout_sec),
        credentials.as_ref(),
    )
    .await?;
    if !client.is_authenticated() {
        warn!("Anonymous access may hide non-public profile history");
    }

    let summary = Exporter::new(client, config).run().await?;

    info!(
        "Completed in {:.1}s: {} of {} submissions saved to {:?} ({} skipped, {}/{} author lookups failed)",
        summary.duration.as_secs_f64(),
        summary.saved,
        summary.submissions,
        summary.path,
        summary.skipped,
        summary.author_failures,
        summary.author_lookups
    );

    Ok(())
}

fn print_export_plan(config: &Config, credentials: Option<&Credentials>) {
    println!("\n=== Export Plan ===\n");
    println!("API: {}", config.base_url);
    println!("Invitation: {}", config.venue.invitation);
    println!("Venue id: {}", config.venue.venue_id);
    println!("Output: {:?}", config.output);
    if config.output.exists() {
        println!("  (exists - rows will be appended)");
    }
    println!("Batch size: {}", config.batch_size);
    println!("Concurrency: {}", config.concurrency);
    println!("Affiliation window: {}", config.window);
    match credentials {
        Some(creds) => println!("Login: {}", creds.username),
        None => println!("Login: anonymous"),
    }
    println!();
}
