//! Named draft repository.
//!
//! Persists *unsubmitted* movement form state under a user-chosen name.
//! Entirely separate from committed movements, which live in the inventory
//! backend; a draft is just the JSONB snapshot of a form.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bodega_core::DraftId;

use super::RepositoryError;
use crate::movements::MovementDraft;

/// Internal row type for draft queries.
#[derive(Debug, sqlx::FromRow)]
struct DraftRow {
    id: i32,
    name: String,
    payload: serde_json::Value,
    updated_at: DateTime<Utc>,
}

/// A saved draft with its decoded form state.
#[derive(Debug, Clone)]
pub struct SavedDraft {
    pub id: DraftId,
    pub name: String,
    pub draft: MovementDraft,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DraftRow> for SavedDraft {
    type Error = RepositoryError;

    fn try_from(row: DraftRow) -> Result<Self, Self::Error> {
        let draft: MovementDraft = serde_json::from_value(row.payload).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid draft payload: {e}"))
        })?;

        Ok(Self {
            id: DraftId::new(row.id),
            name: row.name,
            draft,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for named movement drafts.
pub struct DraftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DraftRepository<'a> {
    /// Create a new draft repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's drafts, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a payload is invalid.
    pub async fn list(&self, user_email: &str) -> Result<Vec<SavedDraft>, RepositoryError> {
        let rows: Vec<DraftRow> = sqlx::query_as(
            r"
            SELECT id, name, payload, updated_at
            FROM admin.movement_drafts
            WHERE user_email = $1
            ORDER BY updated_at DESC
            ",
        )
        .bind(user_email)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(SavedDraft::try_from).collect()
    }

    /// Save a draft under a name, replacing any previous draft of that name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn save(
        &self,
        user_email: &str,
        name: &str,
        draft: &MovementDraft,
    ) -> Result<DraftId, RepositoryError> {
        let payload = serde_json::to_value(draft).map_err(|e| {
            RepositoryError::DataCorruption(format!("draft failed to serialize: {e}"))
        })?;

        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO admin.movement_drafts (user_email, name, payload)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_email, name)
            DO UPDATE SET payload = EXCLUDED.payload, updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(user_email)
        .bind(name)
        .bind(payload)
        .fetch_one(self.pool)
        .await?;

        Ok(DraftId::new(id))
    }

    /// Load one draft by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no draft of that
    /// name.
    pub async fn load(
        &self,
        user_email: &str,
        name: &str,
    ) -> Result<SavedDraft, RepositoryError> {
        let row: Option<DraftRow> = sqlx::query_as(
            r"
            SELECT id, name, payload, updated_at
            FROM admin.movement_drafts
            WHERE user_email = $1 AND name = $2
            ",
        )
        .bind(user_email)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), SavedDraft::try_from)
    }

    /// Delete one draft by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no draft of that
    /// name.
    pub async fn delete(&self, user_email: &str, name: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM admin.movement_drafts
            WHERE user_email = $1 AND name = $2
            ",
        )
        .bind(user_email)
        .bind(name)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
