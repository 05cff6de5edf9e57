mod defaults;
mod types;

pub use defaults::DEFAULT_CONFIG_FILE;
pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            venue: VenueConfig::default(),
            output: default_output(),
            batch_size: default_batch_size(),
            page_size: default_page_size(),
            concurrency: default_concurrency(),
            progress_every: default_progress_every(),
            timeout_sec: default_timeout_sec(),
            window: default_window(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config, falling back to defaults when `path` is the default file
    /// name and does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() && path == Path::new(DEFAULT_CONFIG_FILE) {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".into()));
        }
        if let Some(end_year) = self.window.end_year {
            if end_year < self.window.start_year {
                return Err(ConfigError::Invalid(format!(
                    "window end_year {} is before start_year {}",
                    end_year, self.window.start_year
                )));
            }
        }
        Ok(())
    }
}
