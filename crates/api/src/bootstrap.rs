//! First-run setup: schema, default accounts, historical seed data.
//!
//! Every step is idempotent, so [`run`] is called on every startup.

use cqms_core::roles::Role;
use cqms_db::models::user::CreateUser;
use cqms_db::repositories::UserRepo;
use cqms_db::DbPool;

use crate::auth::password::{hash_password, HashError};
use crate::seed::{self, SeedOutcome};

/// Accounts guaranteed to exist after bootstrap: `(username, password, role)`.
pub const DEFAULT_ACCOUNTS: [(&str, &str, Role); 2] = [
    ("support_admin", "support123", Role::Support),
    ("client_user", "client123", Role::Client),
];

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(HashError),
}

/// Summary of what a bootstrap pass changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Default accounts inserted by this pass (0 once they exist).
    pub accounts_created: usize,
    pub seed: SeedOutcome,
}

/// Apply migrations, ensure the default accounts, then import seed data
/// into an empty `queries` table.
pub async fn run(pool: &DbPool, seed_url: Option<&str>) -> Result<BootstrapReport, BootstrapError> {
    cqms_db::run_migrations(pool).await?;

    let accounts_created = ensure_default_accounts(pool).await?;
    if accounts_created > 0 {
        tracing::info!(accounts_created, "Default accounts created");
    }

    let seed = seed::import_if_empty(pool, seed_url).await?;

    Ok(BootstrapReport {
        accounts_created,
        seed,
    })
}

/// Insert each default account unless its username is already taken.
async fn ensure_default_accounts(pool: &DbPool) -> Result<usize, BootstrapError> {
    let mut created = 0;
    for (username, password, role) in DEFAULT_ACCOUNTS {
        // Skip the hash when the row is already there.
        if UserRepo::username_exists(pool, username).await? {
            continue;
        }

        let input = CreateUser {
            username: username.to_string(),
            password_hash: hash_password(password).map_err(BootstrapError::Hash)?,
            role: role.as_str().to_string(),
        };
        if UserRepo::create_if_absent(pool, &input).await? {
            created += 1;
        }
    }
    Ok(created)
}
