use crate::affiliation::{parse_history, resolve, YearWindow};
use crate::cli::ResolveArgs;
use anyhow::Context;
use serde_json::Value;

pub fn execute(args: ResolveArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {:?}", args.file))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {:?} as JSON", args.file))?;

    let window = match args.end_year {
        Some(end_year) => {
            anyhow::ensure!(
                end_year >= args.start_year,
                "--end-year {} is before --start-year {}",
                end_year,
                args.start_year
            );
            YearWindow::between(args.start_year, end_year)
        }
        None => YearWindow::from_year(args.start_year),
    };

    let history = parse_history(history_value(&value)?)?;
    let result = resolve(&history, window);

    println!("Affiliations: {}", result.institutions_field());
    println!("Positions: {}", result.positions_field());
    Ok(())
}

static NO_HISTORY: Value = Value::Null;

/// Locate the history list inside the accepted input shapes
fn history_value(value: &Value) -> anyhow::Result<&Value> {
    let profile = match value.get("profiles") {
        Some(profiles) => profiles
            .get(0)
            .context("No profile in response: \"profiles\" is empty")?,
        None => value,
    };

    if let Some(content) = profile.get("content") {
        return Ok(content.get("history").unwrap_or(&NO_HISTORY));
    }
    Ok(profile.get("history").unwrap_or(profile))
}
