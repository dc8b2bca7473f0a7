//! In-memory record store for development and testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use profile_directory_core::{ProfileData, UserId, UserProfile};

use super::{RepositoryError, UserStore};

/// Process-local user store. Lists in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    profiles: Arc<RwLock<Vec<UserProfile>>>,
}

impl MemoryUserStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn insert(&self, data: ProfileData) -> Result<UserProfile, RepositoryError> {
        let profile = UserProfile::new(UserId::generate(), data);
        self.profiles.write().await.push(profile.clone());
        Ok(profile)
    }

    async fn replace(
        &self,
        id: UserId,
        data: ProfileData,
    ) -> Result<UserProfile, RepositoryError> {
        let mut profiles = self.profiles.write().await;
        let slot = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = UserProfile::new(id, data);
        Ok(slot.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
