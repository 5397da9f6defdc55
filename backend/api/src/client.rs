use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use notin_core::NotinError;

use crate::types::{ErrorBody, LoginRequest, Note, NoteSource, RegisterRequest, User};

/// Name of the session cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Typed client for the remote Notin API.
///
/// A held token is attached to every request as a bearer `Authorization`
/// header; `login` captures the token the server sets.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Register a new user.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, NotinError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| NotinError::RemoteRequestFailed(format!("registration failed: {e}")))?;
        handle_json(response, "registration failed").await
    }

    /// Log in and capture the access token the server sets.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<(), NotinError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| NotinError::RemoteRequestFailed(format!("login failed: {e}")))?;

        if !response.status().is_success() {
            return Err(error_from(response, "login failed").await);
        }

        self.token = extract_token(&response);
        debug!(token_captured = self.token.is_some(), "login succeeded");
        Ok(())
    }

    /// Fetch the authenticated user.
    pub async fn current_user(&self) -> Result<User, NotinError> {
        let response = self
            .authorize(self.http.get(self.url("/auth/me")))
            .send()
            .await
            .map_err(|e| {
                NotinError::RemoteRequestFailed(format!("failed to fetch current user: {e}"))
            })?;
        handle_json(response, "failed to fetch current user").await
    }

    /// Log out and drop the held token.
    pub async fn logout(&mut self) -> Result<(), NotinError> {
        let result = self
            .authorize(self.http.post(self.url("/auth/logout")))
            .send()
            .await;
        // The token is dropped regardless of what the server said.
        self.token = None;
        result.map_err(|e| NotinError::RemoteRequestFailed(format!("logout failed: {e}")))?;
        Ok(())
    }

    /// Generate a note from a document or YouTube source.
    pub async fn generate_note(&self, source: NoteSource) -> Result<Note, NotinError> {
        let form = Form::new().text("source_type", source.source_type());
        let form = match source {
            NoteSource::Pdf { file_name, bytes } | NoteSource::Docx { file_name, bytes } => {
                form.part("source", Part::bytes(bytes).file_name(file_name))
            }
            NoteSource::Youtube { url } => form.text("url", url),
        };

        let response = self
            .authorize(self.http.post(self.url("/notes/generate")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                NotinError::RemoteRequestFailed(format!("note generation failed: {e}"))
            })?;
        handle_json(response, "note generation failed").await
    }

    /// Fetch all notes belonging to the authenticated user.
    pub async fn collect_notes(&self) -> Result<Vec<Note>, NotinError> {
        let response = self
            .authorize(self.http.get(self.url("/notes/collect")))
            .send()
            .await
            .map_err(|e| NotinError::RemoteRequestFailed(format!("failed to fetch notes: {e}")))?;
        handle_json(response, "failed to fetch notes").await
    }
}

/// Decode a success body, or surface the server's `detail` message.
async fn handle_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, NotinError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| NotinError::RemoteRequestFailed(format!("{context}: {e}")))
    } else {
        Err(error_from(response, context).await)
    }
}

async fn error_from(response: Response, context: &str) -> NotinError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    NotinError::RemoteRequestFailed(message_for(status, detail, context))
}

fn message_for(status: StatusCode, detail: Option<String>, context: &str) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!("{context}: {detail}"),
        _ => format!("{context}: server returned {status}"),
    }
}

/// Pull the `access_token` value out of the response's `Set-Cookie` headers.
fn extract_token(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let (name, rest) = cookie.split_once('=')?;
            if name.trim() != ACCESS_TOKEN_COOKIE {
                return None;
            }
            let token = rest.split(';').next()?.trim();
            (!token.is_empty()).then(|| token.to_string())
        })
}
