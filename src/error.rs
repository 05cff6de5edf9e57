use std::path::PathBuf;
use thiserror::Error;

/// Failures of an export run. Config errors surface earlier, in the CLI.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("OpenReview not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Login failed for '{0}'")]
    LoginFailed(String),

    #[error("OpenReview API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse OpenReview response: {0}")]
    Parse(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Malformed history: {0}")]
    Malformed(String),

    #[error("Failed to decode history: {0}")]
    Json(#[from] serde_json::Error),
}
