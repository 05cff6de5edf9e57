use serde::Deserialize;
use serde_json::Value;

/// A note as returned by the v2 API. Content fields are `{"value": ..}` wrappers.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub id: String,

    #[serde(default)]
    pub forum: Option<String>,

    #[serde(default)]
    pub content: NoteContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteContent {
    #[serde(default)]
    pub title: Option<Wrapped<String>>,

    #[serde(default)]
    pub authors: Option<Wrapped<Vec<String>>>,

    #[serde(default)]
    pub authorids: Option<Wrapped<Vec<String>>>,

    #[serde(default)]
    pub keywords: Option<Wrapped<Vec<String>>>,

    #[serde(default)]
    pub venue: Option<Wrapped<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wrapped<T> {
    #[serde(default)]
    pub value: Option<T>,
}

fn unwrap_str(field: &Option<Wrapped<String>>) -> &str {
    field
        .as_ref()
        .and_then(|w| w.value.as_deref())
        .unwrap_or("")
}

fn unwrap_list(field: &Option<Wrapped<Vec<String>>>) -> &[String] {
    field
        .as_ref()
        .and_then(|w| w.value.as_deref())
        .unwrap_or(&[])
}

impl Note {
    /// Forum id, which is the submission id for top-level notes
    pub fn forum_id(&self) -> &str {
        self.forum.as_deref().unwrap_or(&self.id)
    }

    pub fn title(&self) -> &str {
        unwrap_str(&self.content.title)
    }

    pub fn authors(&self) -> &[String] {
        unwrap_list(&self.content.authors)
    }

    pub fn author_ids(&self) -> &[String] {
        unwrap_list(&self.content.authorids)
    }

    pub fn keywords(&self) -> &[String] {
        unwrap_list(&self.content.keywords)
    }

    /// Last word of the venue string, e.g. "NeurIPS 2025 poster" -> "poster"
    pub fn venue_label(&self) -> &str {
        unwrap_str(&self.content.venue)
            .split_whitespace()
            .last()
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,

    #[serde(default)]
    pub content: ProfileContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileContent {
    /// Kept raw; decoded by the affiliation resolver
    #[serde(default)]
    pub history: Value,
}

impl Profile {
    pub fn history(&self) -> &Value {
        &self.content.history
    }
}

#[derive(Debug, Deserialize)]
pub struct NotesResponse {
    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ProfilesResponse {
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body shape used by the API
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}
