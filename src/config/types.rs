use crate::affiliation::YearWindow;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub venue: VenueConfig,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Rows buffered before each append to the output file
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Max profile lookups in flight per submission
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_progress_every")]
    pub progress_every: usize,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default = "default_window")]
    pub window: YearWindow,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct VenueConfig {
    #[serde(default = "default_invitation")]
    pub invitation: String,

    #[serde(default = "default_venue_id")]
    pub venue_id: String,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            invitation: default_invitation(),
            venue_id: default_venue_id(),
        }
    }
}

pub fn default_window() -> YearWindow {
    YearWindow::from_year(default_start_year())
}

/// Login credentials. Never serialized.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both parts must be present and non-empty
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
