//! Core types for the profile directory.
//!
//! This module provides type-safe wrappers for the fields of a user profile.

pub mod avatar;
pub mod email;
pub mod id;
pub mod name;
pub mod phone;
pub mod profile;

pub use avatar::{Avatar, AvatarError};
pub use email::{Email, EmailError};
pub use id::*;
pub use name::{NameError, PersonName};
pub use phone::{PhoneNumber, PhoneNumberError};
pub use profile::{ProfileData, UserFields, UserProfile, ValidationError};
