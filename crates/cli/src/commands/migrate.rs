//! Database migration command.
//!
//! Runs the embedded admin migrations (the `admin` schema with the
//! `movement_drafts` table) and then the tower-sessions store migration so
//! the session table matches what the server expects at startup.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use sqlx::PgPool;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Session store error: {0}")]
    SessionStore(String),
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns [`MigrationError`] if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running admin migrations...");
    bodega_admin::db::MIGRATOR.run(&pool).await?;

    tracing::info!("Running session store migration...");
    let store = PostgresStore::new(pool)
        .with_schema_name("admin")
        .map_err(MigrationError::SessionStore)?
        .with_table_name("session")
        .map_err(MigrationError::SessionStore)?;
    store
        .migrate()
        .await
        .map_err(|e| MigrationError::SessionStore(e.to_string()))?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
