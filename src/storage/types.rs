//! Stored entity types and storage errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

/// A short text post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    /// Owning user; serialized as `null` when absent.
    pub user_id: Option<Uuid>,
}

/// Parameters for inserting a chirp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChirp {
    pub body: String,
    pub user_id: Option<Uuid>,
}

/// Errors reported by a [`ChirpStore`](super::ChirpStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Another user already holds this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// A chirp referenced a user that does not exist.
    #[error("user {0} does not exist")]
    MissingUser(Uuid),

    /// The backing store could not serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
