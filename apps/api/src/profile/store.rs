//! Profile Store — document-style persistence keyed by identity id.
//!
//! The store contract is the narrow get/create/update interface the rest of
//! the service consumes. Production uses PostgreSQL; tests wire the
//! in-memory implementation into `AppState`.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::errors::AppError;
use crate::profile::model::{ProfilePatch, ProfileRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Profile {id} not found")),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

/// Carried in `AppState` as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<ProfileRow>, StoreError>;

    async fn create(&self, profile: &ProfileRow) -> Result<(), StoreError>;

    /// Applies a partial update and returns the resulting document.
    /// Last write wins on concurrent updates to the same profile.
    async fn update(&self, id: &str, patch: ProfilePatch) -> Result<ProfileRow, StoreError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, id: &str) -> Result<Option<ProfileRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create(&self, profile: &ProfileRow) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, email, name, target_career, next_step, test_completed,
                 scores, awareness_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.target_career)
        .bind(&profile.next_step)
        .bind(profile.test_completed)
        .bind(&profile.scores)
        .bind(profile.awareness_score)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, id: &str, patch: ProfilePatch) -> Result<ProfileRow, StoreError> {
        sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles SET
                target_career = COALESCE($2, target_career),
                next_step = COALESCE($3, next_step),
                test_completed = COALESCE($4, test_completed),
                scores = COALESCE($5, scores),
                awareness_score = COALESCE($6, awareness_score)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.target_career)
        .bind(patch.next_step)
        .bind(patch.test_completed)
        .bind(patch.scores.map(sqlx::types::Json))
        .bind(patch.awareness_score)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
