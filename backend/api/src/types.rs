use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    pub username: String,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user as returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    /// Present on registration responses, absent from `/auth/me`.
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    pub username: String,
}

/// A generated note.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    /// Markdown body; `/notes/generate` may omit it in slim responses.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Source material for note generation.
#[derive(Debug, Clone)]
pub enum NoteSource {
    Pdf { file_name: String, bytes: Vec<u8> },
    Docx { file_name: String, bytes: Vec<u8> },
    Youtube { url: String },
}

impl NoteSource {
    /// Wire value for the `source_type` form field.
    pub fn source_type(&self) -> &'static str {
        match self {
            NoteSource::Pdf { .. } => "pdf",
            NoteSource::Docx { .. } => "docx",
            NoteSource::Youtube { .. } => "youtube",
        }
    }
}

/// Error body shape shared by all endpoints: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}
