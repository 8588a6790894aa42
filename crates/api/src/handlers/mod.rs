pub mod auth;
pub mod queries;
