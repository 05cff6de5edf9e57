use crate::cli::SchemaArgs;
use crate::config::Config;
use anyhow::Context;
use schemars::schema_for;
use tracing::info;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = schema_for!(Config);
    let json = serde_json::to_string_pretty(&schema)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write schema to {:?}", path))?;
            info!("Wrote config schema to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
