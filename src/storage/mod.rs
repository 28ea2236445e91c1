//! Storage collaborator.
//!
//! # Responsibilities
//! - Define the operations the HTTP layer needs from persistence
//! - Own uniqueness of user emails and the user → chirp ownership link
//! - Cascade chirp deletion when users are purged
//!
//! # Design Decisions
//! - Handlers only see `Arc<dyn ChirpStore>`; backends are swappable
//! - `list_chirps` yields chirps in ascending creation order
//! - The store synchronizes itself; callers hold no locks

pub mod memory;
pub mod types;

use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use types::{Chirp, NewChirp, StorageError, StorageResult, User};

/// Persistence operations consumed by the HTTP handlers.
#[async_trait]
pub trait ChirpStore: Send + Sync {
    /// Register a user. Fails if the email is taken.
    async fn create_user(&self, email: &str) -> StorageResult<User>;

    /// Insert a chirp. Fails if `user_id` names an unknown user.
    async fn create_chirp(&self, chirp: NewChirp) -> StorageResult<Chirp>;

    /// All chirps, oldest first.
    async fn list_chirps(&self) -> StorageResult<Vec<Chirp>>;

    /// Look up a chirp. `Ok(None)` when no chirp has this id.
    async fn get_chirp(&self, id: Uuid) -> StorageResult<Option<Chirp>>;

    /// Remove every user together with the chirps they own.
    async fn delete_all_users(&self) -> StorageResult<()>;
}
