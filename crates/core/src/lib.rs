//! Profile Directory Core - Shared types library.
//!
//! This crate provides the domain types used across all profile directory
//! components:
//! - `api` - REST service persisting user profiles
//! - `console` - Form-driven client for operators
//!
//! # Architecture
//!
//! The core crate contains only types and validation rules - no I/O, no
//! database access, no HTTP clients. Both the client and the API validate
//! with the same rules, so a record accepted by one is accepted by the other.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, names, emails, phone numbers,
//!   avatars, and the user profile record itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
