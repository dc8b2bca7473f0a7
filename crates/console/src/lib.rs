//! Profile Directory console.
//!
//! Operator-facing form for creating, editing, and deleting user profiles.
//! All state lives in [`controller::FormController`]; the axum app in
//! [`routes`] renders it as HTML and forwards operator actions to it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod controller;
pub mod routes;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
