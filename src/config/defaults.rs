use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "openreview-export.yaml";

pub fn default_base_url() -> String {
    "https://api2.openreview.net".to_string()
}

pub fn default_invitation() -> String {
    "NeurIPS.cc/2025/Conference/-/Submission".to_string()
}

pub fn default_venue_id() -> String {
    "NeurIPS.cc/2025/Conference".to_string()
}

pub fn default_output() -> PathBuf {
    PathBuf::from("neurips2025_accepted.csv")
}

pub fn default_batch_size() -> usize {
    100
}

pub fn default_page_size() -> usize {
    1000 // API maximum per request
}

pub fn default_concurrency() -> usize {
    1
}

pub fn default_progress_every() -> usize {
    25
}

pub fn default_start_year() -> i32 {
    2025
}

pub fn default_timeout_sec() -> u64 {
    60
}
