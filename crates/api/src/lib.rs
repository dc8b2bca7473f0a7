//! Profile Directory API library.
//!
//! This crate provides the REST service as a library, allowing it to be
//! tested in-process and embedded by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
