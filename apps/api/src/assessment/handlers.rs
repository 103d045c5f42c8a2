use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::assessment::questions::{question_bank, Question};
use crate::assessment::scoring::{calculate_scores, Category};
use crate::auth::extract::CurrentUser;
use crate::errors::AppError;
use crate::profile::model::ProfilePatch;
use crate::routes::StatusResponse;
use crate::state::AppState;

/// POST /submit-test
///
/// Scores a submitted quiz and persists the result on the caller's profile.
/// The payload maps each of the five category keys to its raw 1–5 answers.
pub async fn submit_test(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(answers): Json<BTreeMap<Category, Vec<i64>>>,
) -> Result<Json<StatusResponse>, AppError> {
    let report = calculate_scores(&answers).map_err(|e| AppError::Validation(e.to_string()))?;

    // scores, awarenessScore and testCompleted are only ever written
    // together, so they cannot drift apart.
    state
        .profiles
        .update(
            &user.id,
            ProfilePatch {
                scores: Some(report.scores),
                awareness_score: Some(i32::from(report.awareness_score)),
                test_completed: Some(true),
                ..Default::default()
            },
        )
        .await?;

    info!(
        user_id = %user.id,
        awareness_score = report.awareness_score,
        "assessment submitted"
    );
    Ok(Json(StatusResponse::ok()))
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

/// GET /assessment/questions
pub async fn questions() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: question_bank(),
    })
}
