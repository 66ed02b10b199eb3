//! Profile Store
//!
//! Narrow persistence interface. The store is not trusted to validate
//! types; everything written through it has already been sanitized.

use std::collections::HashMap;

use async_trait::async_trait;
use biographer_core::{Profile, ProfilePatch};
use tokio::sync::RwLock;

use crate::utils::error::{AppError, AppResult};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the current snapshot for `id`
    async fn get(&self, id: &str) -> AppResult<Profile>;

    /// Apply a partial update to the snapshot for `id`. Patches naming
    /// fields outside the schema are refused.
    async fn upsert(&self, id: &str, patch: &ProfilePatch) -> AppResult<()>;
}

/// Process-local store, used by tests and the CLI
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile, replacing any existing snapshot
    pub async fn insert(&self, id: impl Into<String>, profile: Profile) {
        self.profiles.write().await.insert(id.into(), profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, id: &str) -> AppResult<Profile> {
        self.profiles
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("profile {}", id)))
    }

    async fn upsert(&self, id: &str, patch: &ProfilePatch) -> AppResult<()> {
        patch.validate()?;
        let mut profiles = self.profiles.write().await;
        profiles.entry(id.to_string()).or_default().apply(patch);
        Ok(())
    }
}
