//! Form controller: the console's draft record, fetched list, and mode.
//!
//! The controller owns all client-side state. The rendering layer reads it
//! through accessors and changes it only through the operations below.
//!
//! # Modes
//!
//! - **Create** (default): submitting inserts a new record.
//! - **Edit**: entered via [`FormController::begin_edit`]; submitting
//!   replaces the selected record. A successful submit or
//!   [`FormController::reset`] returns to Create.
//!
//! # Refresh policy
//!
//! Every successful mutation is followed by a full [`FormController::load_list`].
//! The list is never patched locally.

use thiserror::Error;
use tracing::instrument;

use profile_directory_core::{Avatar, PersonName, UserFields, UserId, UserProfile, ValidationError};

use crate::api::{ApiError, UsersApi};

pub const FETCH_FAILED: &str = "Could not fetch users. Please try again later.";
pub const CREATE_FAILED: &str = "Failed to add user.";
pub const UPDATE_FAILED: &str = "Failed to update user.";
pub const DELETE_FAILED: &str = "Failed to delete user.";

/// Whether submitting inserts or replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    /// Editing the record with this identifier.
    Edit(UserId),
}

/// Text fields an operator can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Number,
}

/// Operator's answer to "Are you sure you want to delete this user?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// In-progress record pending submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub number: String,
    pub avatar: Avatar,
}

impl Draft {
    /// The request body for this draft (never includes an identifier).
    #[must_use]
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            number: self.number.clone(),
            avatar: self.avatar,
        }
    }
}

impl From<&UserProfile> for Draft {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.to_string(),
            email: profile.email.to_string(),
            number: profile.number.to_string(),
            avatar: profile.avatar,
        }
    }
}

/// Check a draft before submission, reporting only the first failure.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`] (name, then email, then
/// number).
pub fn validate(draft: &Draft) -> Result<(), ValidationError> {
    draft.fields().validate().map(|_| ())
}

/// Why a controller operation did not complete.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Client state machine over a [`UsersApi`].
#[derive(Debug)]
pub struct FormController<A> {
    api: A,
    users: Vec<UserProfile>,
    draft: Draft,
    mode: Mode,
    error: Option<String>,
}

impl<A: UsersApi> FormController<A> {
    /// Create a controller in Create mode with an empty draft and list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            draft: Draft::default(),
            mode: Mode::Create,
            error: None,
        }
    }

    /// Records from the last successful fetch.
    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    /// Look up a fetched record by identifier.
    pub fn find_user(&self, id: UserId) -> Option<&UserProfile> {
        self.users.iter().find(|u| u.id == id)
    }

    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    /// The single message currently shown to the operator.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Showing error");
        self.error = Some(message);
    }

    /// Fetch every record. On failure the previous list stays visible.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording the fetch-failed message.
    #[instrument(skip(self))]
    pub async fn load_list(&mut self) -> Result<(), FormError> {
        match self.api.list().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "Loaded users");
                self.users = users;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch users");
                self.set_error(FETCH_FAILED);
                Err(e.into())
            }
        }
    }

    /// Update one text field of the draft.
    ///
    /// A name containing anything other than letters and whitespace is
    /// ignored. Returns whether the draft changed.
    pub fn change_field(&mut self, field: Field, value: &str) -> bool {
        match field {
            Field::Name => {
                if !PersonName::is_valid_input(value) {
                    return false;
                }
                self.draft.name = value.to_string();
            }
            Field::Email => self.draft.email = value.to_string(),
            Field::Number => self.draft.number = value.to_string(),
        }
        true
    }

    pub const fn select_avatar(&mut self, avatar: Avatar) {
        self.draft.avatar = avatar;
    }

    /// Validate, then create or update depending on the mode.
    ///
    /// On success the draft returns to an empty Create state and the list is
    /// re-fetched.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error; its message is already recorded.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn submit(&mut self) -> Result<(), FormError> {
        if let Err(e) = validate(&self.draft) {
            self.set_error(e.to_string());
            return Err(e.into());
        }
        self.error = None;

        let fields = self.draft.fields();
        let (result, fallback) = match self.mode {
            Mode::Create => (self.api.create(&fields).await, CREATE_FAILED),
            Mode::Edit(id) => (self.api.update(id, &fields).await, UPDATE_FAILED),
        };

        match result {
            Ok(profile) => {
                tracing::info!(user_id = %profile.id, "Saved user");
                self.reset();
                self.after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.set_error(e.message().unwrap_or(fallback).to_string());
                Err(e.into())
            }
        }
    }

    /// Copy an existing record into the draft and switch to Edit mode.
    pub fn begin_edit(&mut self, profile: &UserProfile) {
        self.draft = Draft::from(profile);
        self.mode = Mode::Edit(profile.id);
        self.error = None;
    }

    /// Discard the draft and return to Create mode.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.mode = Mode::Create;
        self.error = None;
    }

    /// Delete a record once the operator has confirmed.
    ///
    /// A declined confirmation does nothing.
    ///
    /// # Errors
    ///
    /// Returns the API error; its message is already recorded.
    #[instrument(skip(self))]
    pub async fn remove_record(
        &mut self,
        id: UserId,
        confirmation: Confirmation,
    ) -> Result<(), FormError> {
        if confirmation == Confirmation::Declined {
            tracing::debug!("Delete declined");
            return Ok(());
        }

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(user_id = %id, "Deleted user");
                self.after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.set_error(e.message().unwrap_or(DELETE_FAILED).to_string());
                Err(e.into())
            }
        }
    }

    /// Re-fetch after a successful mutation. A fetch failure only shows its
    /// message; the mutation itself already succeeded.
    async fn after_mutation(&mut self) {
        let _ = self.load_list().await;
    }
}
