//! Domain types and validation for the client query management system.
//!
//! This crate has no database or HTTP dependencies. Everything here operates
//! on values passed in by the `db` and `api` crates.

pub mod error;
pub mod query;
pub mod roles;
pub mod session;
pub mod types;
