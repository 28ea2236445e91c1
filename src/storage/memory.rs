//! In-process storage backend.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::storage::{Chirp, ChirpStore, NewChirp, StorageError, StorageResult, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    emails: HashMap<String, Uuid>,
    /// Insertion sequence → chirp, so iteration is creation order.
    chirps: BTreeMap<u64, Chirp>,
    chirp_index: HashMap<Uuid, u64>,
    next_seq: u64,
}

/// A [`ChirpStore`] kept entirely in memory.
///
/// All tables sit behind one lock so that a purge and a concurrent insert
/// can never leave a chirp pointing at a deleted user.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl ChirpStore for MemoryStore {
    async fn create_user(&self, email: &str) -> StorageResult<User> {
        let mut tables = self.tables.write().await;
        if tables.emails.contains_key(email) {
            return Err(StorageError::DuplicateEmail(email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
        };
        tables.emails.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "User stored");
        Ok(user)
    }

    async fn create_chirp(&self, new: NewChirp) -> StorageResult<Chirp> {
        let mut tables = self.tables.write().await;
        if let Some(owner) = new.user_id {
            if !tables.users.contains_key(&owner) {
                return Err(StorageError::MissingUser(owner));
            }
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: new.body,
            user_id: new.user_id,
        };
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.chirp_index.insert(chirp.id, seq);
        tables.chirps.insert(seq, chirp.clone());

        tracing::debug!(chirp_id = %chirp.id, "Chirp stored");
        Ok(chirp)
    }

    async fn list_chirps(&self) -> StorageResult<Vec<Chirp>> {
        let tables = self.tables.read().await;
        Ok(tables.chirps.values().cloned().collect())
    }

    async fn get_chirp(&self, id: Uuid) -> StorageResult<Option<Chirp>> {
        let tables = self.tables.read().await;
        Ok(tables
            .chirp_index
            .get(&id)
            .and_then(|seq| tables.chirps.get(seq))
            .cloned())
    }

    async fn delete_all_users(&self) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        let Tables {
            users,
            emails,
            chirps,
            chirp_index,
            ..
        } = &mut *tables;

        chirps.retain(|_, chirp| match chirp.user_id {
            Some(owner) => !users.contains_key(&owner),
            None => true,
        });
        chirp_index.retain(|_, seq| chirps.contains_key(seq));

        let removed = users.len();
        users.clear();
        emails.clear();

        tracing::info!(removed_users = removed, remaining_chirps = chirps.len(), "Users purged");
        Ok(())
    }
}
