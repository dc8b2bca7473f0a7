//! In-memory [`UsersApi`] for controller and route tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use profile_directory_core::{Avatar, UserFields, UserId, UserProfile};

use crate::api::{ApiError, UsersApi};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserProfile>,
    calls: usize,
    fail_list: bool,
    fail_mutation: bool,
}

/// Shared-state fake: clones observe the same records.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

fn not_found() -> ApiError {
    ApiError::Api {
        status: 404,
        message: Some("User not found".to_string()),
    }
}

fn server_error() -> ApiError {
    ApiError::Api {
        status: 500,
        message: None,
    }
}

#[allow(clippy::unwrap_used)]
impl FakeApi {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Insert a valid record directly, bypassing the call counter.
    pub fn seed(&self, name: &str) -> UserProfile {
        let fields = UserFields {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            number: "5551234567".to_string(),
            avatar: Avatar::One,
        };
        let profile = UserProfile::new(UserId::generate(), fields.validate().unwrap());
        self.lock().users.push(profile.clone());
        profile
    }

    /// Remove a record directly, as if another operator deleted it.
    pub fn remove(&self, id: UserId) {
        self.lock().users.retain(|u| u.id != id);
    }

    pub fn fail_next_list(&self) {
        self.lock().fail_list = true;
    }

    pub fn fail_next_mutation(&self) {
        self.lock().fail_mutation = true;
    }

    /// Number of API calls made so far.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn begin_mutation(&self) -> Result<MutexGuard<'_, Inner>, ApiError> {
        let mut inner = self.lock();
        inner.calls += 1;
        if std::mem::take(&mut inner.fail_mutation) {
            return Err(server_error());
        }
        Ok(inner)
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl UsersApi for FakeApi {
    async fn list(&self) -> Result<Vec<UserProfile>, ApiError> {
        let mut inner = self.lock();
        inner.calls += 1;
        if std::mem::take(&mut inner.fail_list) {
            return Err(server_error());
        }
        Ok(inner.users.clone())
    }

    async fn create(&self, fields: &UserFields) -> Result<UserProfile, ApiError> {
        let mut inner = self.begin_mutation()?;
        let profile = UserProfile::new(UserId::generate(), fields.validate().unwrap());
        inner.users.push(profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<UserProfile, ApiError> {
        let mut inner = self.begin_mutation()?;
        let data = fields.validate().unwrap();
        let slot = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(not_found)?;
        *slot = UserProfile::new(id, data);
        Ok(slot.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        let mut inner = self.begin_mutation()?;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
