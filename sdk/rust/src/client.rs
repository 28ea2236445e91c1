use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateChirpRequest<'a> {
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct CleanedBody {
    cleaned_body: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Errors returned by [`ChirpyClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// A value could not be encoded as JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            ClientError::Json(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed client for the chirpy HTTP API.
pub struct ChirpyClient {
    client: Client,
    base_url: String,
}

impl ChirpyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Liveness probe. Returns the plain-text body.
    pub async fn health(&self) -> ClientResult<String> {
        let resp = self.client.get(self.url("/api/healthz")).send().await?;
        Ok(check(resp).await?.text().await?)
    }

    /// Fetch the admin metrics page (HTML).
    pub async fn metrics_page(&self) -> ClientResult<String> {
        let resp = self.client.get(self.url("/admin/metrics")).send().await?;
        Ok(check(resp).await?.text().await?)
    }

    /// Reset the visit counter and purge users. Only permitted on dev servers.
    pub async fn reset(&self) -> ClientResult<()> {
        let resp = self.client.post(self.url("/admin/reset")).send().await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn create_user(&self, email: &str) -> ClientResult<User> {
        let resp = self
            .client
            .post(self.url("/api/users"))
            .json(&CreateUserRequest { email })
            .send()
            .await?;
        decode(resp).await
    }

    /// Persist a chirp. The body is stored as sent.
    pub async fn create_chirp(&self, body: &str, user_id: Option<Uuid>) -> ClientResult<Chirp> {
        let resp = self
            .client
            .post(self.url("/api/chirps"))
            .json(&CreateChirpRequest { body, user_id })
            .send()
            .await?;
        decode(resp).await
    }

    /// Run the moderation check without persisting. Returns the cleaned text.
    pub async fn validate_chirp(&self, body: &str) -> ClientResult<String> {
        let resp = self
            .client
            .post(self.url("/api/validate_chirp"))
            .json(&CreateChirpRequest { body, user_id: None })
            .send()
            .await?;
        let cleaned: CleanedBody = decode(resp).await?;
        Ok(cleaned.cleaned_body)
    }

    pub async fn list_chirps(&self) -> ClientResult<Vec<Chirp>> {
        let resp = self.client.get(self.url("/api/chirps")).send().await?;
        decode(resp).await
    }

    /// Fetch one chirp. The id is sent verbatim so callers may probe malformed ids.
    pub async fn get_chirp(&self, id: &str) -> ClientResult<Chirp> {
        let resp = self
            .client
            .get(self.url(&format!("/api/chirps/{}", id)))
            .send()
            .await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(ClientError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    Ok(check(resp).await?.json::<T>().await?)
}
