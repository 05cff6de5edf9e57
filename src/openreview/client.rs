use super::{ApiErrorBody, LoginResponse, Note, NotesResponse, Profile, ProfilesResponse, ReviewSource};
use crate::config::{Credentials, VenueConfig};
use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the OpenReview v2 API
#[derive(Clone)]
pub struct OpenReviewClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl OpenReviewClient {
    /// Create an anonymous client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::NotReachable {
                url: base_url.to_string(),
                source: e,
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    /// Create a client, logging in when credentials are given
    pub async fn connect(
        base_url: &str,
        timeout: Duration,
        credentials: Option<&Credentials>,
    ) -> Result<Self, ClientError> {
        let mut client = Self::new(base_url, timeout)?;
        match credentials {
            Some(creds) => client.login(creds).await?,
            None => info!("No credentials configured; using anonymous access"),
        }
        Ok(client)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn login(&mut self, creds: &Credentials) -> Result<(), ClientError> {
        let url = format!("{}/login", self.base_url);
        let body = serde_json::json!({ "id": creds.username, "password": creds.password });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        if !resp.status().is_success() {
            debug!("Login rejected with status {}", resp.status());
            return Err(ClientError::LoginFailed(creds.username.clone()));
        }

        let login: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        self.token = Some(login.token);
        info!("Logged in to {} as {}", self.base_url, creds.username);
        Ok(())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.client.get(url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .get(path)
            .query(query)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let resp = check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    fn unreachable(&self, source: reqwest::Error) -> ClientError {
        ClientError::NotReachable {
            url: self.base_url.clone(),
            source,
        }
    }
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: api_error_message(text),
    })
}

/// `message` (or `name`) from a JSON error body, else the raw body
fn api_error_message(text: String) -> String {
    serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.name))
        .unwrap_or(text)
}

/// Whether listing should stop after a page of `fetched` notes, `total`
/// collected so far. A reported `count` is authoritative since the server
/// may cap pages below `page_size`; without one a short page ends the list.
fn pagination_done(fetched: usize, total: usize, page_size: usize, count: Option<usize>) -> bool {
    if fetched == 0 {
        return true;
    }
    match count {
        Some(count) => total >= count,
        None => fetched < page_size,
    }
}

/// Query parameter used to look up a profile: emails by `email`, tilde ids by `id`
pub(crate) fn profile_query(id: &str) -> (&'static str, String) {
    if id.contains('@') {
        ("email", id.to_string())
    } else {
        ("id", id.to_string())
    }
}

#[async_trait]
impl ReviewSource for OpenReviewClient {
    async fn list_submissions(
        &self,
        venue: &VenueConfig,
        page_size: usize,
    ) -> Result<Vec<Note>, ClientError> {
        let mut notes = Vec::new();
        let mut offset = 0usize;

        loop {
            let query = [
                ("invitation", venue.invitation.clone()),
                ("content.venueid", venue.venue_id.clone()),
                ("limit", page_size.to_string()),
                ("offset", offset.to_string()),
            ];
            let page: NotesResponse = self.get_json("/notes", &query).await?;
            let fetched = page.notes.len();
            notes.extend(page.notes);
            offset += fetched;

            debug!(
                "Fetched page of {} notes ({} total{})",
                fetched,
                notes.len(),
                page.count.map(|c| format!(" of {}", c)).unwrap_or_default()
            );

            if pagination_done(fetched, notes.len(), page_size, page.count) {
                break;
            }
        }

        Ok(notes)
    }

    async fn get_note(&self, id: &str) -> Result<Option<Note>, ClientError> {
        let page: NotesResponse = self.get_json("/notes", &[("id", id.to_string())]).await?;
        Ok(page.notes.into_iter().next())
    }

    async fn get_profile(&self, id: &str) -> Result<Profile, ClientError> {
        let page: ProfilesResponse = self.get_json("/profiles", &[profile_query(id)]).await?;
        page.profiles
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::ProfileNotFound(id.to_string()))
    }
}
