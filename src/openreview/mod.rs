mod client;
mod types;

pub use client::OpenReviewClient;
pub use types::*;

use crate::config::VenueConfig;
use crate::error::ClientError;
use async_trait::async_trait;

/// Source of submissions and profiles
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// All submissions posted to the venue's invitation with the venue id
    async fn list_submissions(
        &self,
        venue: &VenueConfig,
        page_size: usize,
    ) -> Result<Vec<Note>, ClientError>;

    async fn get_note(&self, id: &str) -> Result<Option<Note>, ClientError>;

    /// Look up a profile by tilde id or email
    async fn get_profile(&self, id: &str) -> Result<Profile, ClientError>;
}
