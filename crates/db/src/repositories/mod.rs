//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and run exactly one statement.

pub mod query_repo;
pub mod user_repo;

pub use query_repo::QueryRepo;
pub use user_repo::UserRepo;
