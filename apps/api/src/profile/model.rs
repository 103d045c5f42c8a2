use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::assessment::scoring::Category;

/// Name recorded for users whose identity carries no display name.
pub const DEFAULT_NAME: &str = "Student";

/// One user's profile document, keyed by the identity provider's stable id.
///
/// Serialized camelCase; `awarenessScore` only appears once a quiz has been
/// submitted. Profiles are never deleted by the application.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
    pub id: String,
    pub email: Option<String>,
    pub name: String,
    pub target_career: Option<String>,
    pub next_step: Option<String>,
    pub test_completed: bool,
    pub scores: Json<BTreeMap<Category, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awareness_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    /// A fresh profile as created on first login: no career, quiz not taken,
    /// every category scored zero.
    pub fn new(id: String, email: Option<String>, name: String) -> Self {
        let zero_scores = Category::ALL.iter().map(|c| (*c, 0.0)).collect();
        Self {
            id,
            email,
            name,
            target_career: None,
            next_step: None,
            test_completed: false,
            scores: Json(zero_scores),
            awareness_score: None,
            created_at: Utc::now(),
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub target_career: Option<String>,
    pub next_step: Option<String>,
    pub test_completed: Option<bool>,
    pub scores: Option<BTreeMap<Category, f64>>,
    pub awareness_score: Option<i32>,
}
