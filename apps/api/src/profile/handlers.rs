use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assessment::benchmarks::BenchmarkVector;
use crate::auth::extract::CurrentUser;
use crate::errors::AppError;
use crate::profile::model::{ProfilePatch, ProfileRow};
use crate::routes::StatusResponse;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub next_step: String,
    pub career: String,
}

/// POST /submit-onboarding
///
/// Records the target career and next-step preference captured during
/// onboarding. The career may be any non-empty text, not just a career the
/// benchmark table curates.
pub async fn submit_onboarding(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<OnboardingRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let career = req.career.trim();
    let next_step = req.next_step.trim();
    if career.is_empty() || next_step.is_empty() {
        return Err(AppError::Validation(
            "career and nextStep must be non-empty".to_string(),
        ));
    }

    state
        .profiles
        .update(
            &user.id,
            ProfilePatch {
                target_career: Some(career.to_string()),
                next_step: Some(next_step.to_string()),
                ..Default::default()
            },
        )
        .await?;

    info!(user_id = %user.id, career = %career, "onboarding recorded");
    Ok(Json(StatusResponse::ok()))
}

/// Profile document plus the benchmark vector for the user's target career,
/// `null` until onboarding has recorded one.
#[derive(Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: ProfileRow,
    pub benchmark: Option<BenchmarkVector>,
}

/// GET /profile/:user_id
///
/// Serves only the authenticated user's own document; a foreign id yields
/// 404 rather than confirming the id exists.
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, AppError> {
    if user_id != user.id {
        warn!(user_id = %user.id, requested = %user_id, "cross-user profile request denied");
        return Err(AppError::NotFound(format!("Profile {user_id} not found")));
    }

    let profile = state
        .profiles
        .get(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {user_id} not found")))?;

    let benchmark = profile
        .target_career
        .as_deref()
        .map(|career| state.benchmarks.lookup(career));

    Ok(Json(ProfileView { profile, benchmark }))
}
