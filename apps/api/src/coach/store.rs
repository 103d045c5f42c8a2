//! Dialogue store — per-user log of coach exchanges, capped at the most
//! recent turns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::profile::store::StoreError;

/// Turns retained per user; older ones are pruned on insert.
pub const HISTORY_LIMIT: i64 = 5;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DialogueTurnRow {
    pub id: Uuid,
    pub user_id: String,
    pub user_message: String,
    pub coach_reply: String,
    pub created_at: DateTime<Utc>,
}

/// Carried in `AppState` as `Arc<dyn DialogueStore>`.
#[async_trait]
pub trait DialogueStore: Send + Sync {
    async fn append(
        &self,
        user_id: &str,
        user_message: &str,
        coach_reply: &str,
    ) -> Result<(), StoreError>;

    /// The caller's most recent turns, oldest first.
    async fn recent(&self, user_id: &str, limit: i64) -> Result<Vec<DialogueTurnRow>, StoreError>;
}

pub struct PgDialogueStore {
    pool: PgPool,
}

impl PgDialogueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DialogueStore for PgDialogueStore {
    async fn append(
        &self,
        user_id: &str,
        user_message: &str,
        coach_reply: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO coach_messages (id, user_id, user_message, coach_reply)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(user_message)
        .bind(coach_reply)
        .execute(&self.pool)
        .await?;

        // Keep only the newest turns per user.
        sqlx::query(
            r#"
            DELETE FROM coach_messages
            WHERE user_id = $1 AND id NOT IN (
                SELECT id FROM coach_messages
                WHERE user_id = $1
                ORDER BY created_at DESC
                LIMIT $2
            )
            "#,
        )
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent(&self, user_id: &str, limit: i64) -> Result<Vec<DialogueTurnRow>, StoreError> {
        let mut turns = sqlx::query_as::<_, DialogueTurnRow>(
            r#"
            SELECT * FROM coach_messages
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        turns.reverse();
        Ok(turns)
    }
}
