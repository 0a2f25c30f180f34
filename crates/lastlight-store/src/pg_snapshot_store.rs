//! `PostgreSQL` implementation of the `SnapshotStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use lastlight_core::error::GameError;
use lastlight_core::store::{SnapshotStore, StoredSnapshot};

use crate::schema::CREATE_GAME_SNAPSHOTS_TABLE;

/// PostgreSQL-backed snapshot store.
#[derive(Debug, Clone)]
pub struct PgSnapshotStore {
    pool: PgPool,
}

impl PgSnapshotStore {
    /// Creates a new `PgSnapshotStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the snapshots table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Persistence` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), GameError> {
        sqlx::raw_sql(CREATE_GAME_SNAPSHOTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[allow(clippy::needless_pass_by_value)]
fn db_error(err: sqlx::Error) -> GameError {
    GameError::Persistence(err.to_string())
}

#[async_trait]
impl SnapshotStore for PgSnapshotStore {
    async fn load(&self, name: &str) -> Result<Option<StoredSnapshot>, GameError> {
        let row: Option<(String, serde_json::Value, DateTime<Utc>)> =
            sqlx::query_as("SELECT name, payload, saved_at FROM game_snapshots WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(|(name, payload, saved_at)| StoredSnapshot {
            name,
            payload,
            saved_at,
        }))
    }

    async fn save(&self, snapshot: &StoredSnapshot) -> Result<(), GameError> {
        sqlx::query(
            "INSERT INTO game_snapshots (name, payload, saved_at) VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO UPDATE SET payload = EXCLUDED.payload, saved_at = EXCLUDED.saved_at",
        )
        .bind(&snapshot.name)
        .bind(&snapshot.payload)
        .bind(snapshot.saved_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        debug!(name = %snapshot.name, "snapshot upserted");
        Ok(())
    }
}
