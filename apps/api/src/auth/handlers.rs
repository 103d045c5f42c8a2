use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::identity::IdentityError;
use crate::auth::session::session_cookie;
use crate::errors::AppError;
use crate::profile::model::{ProfileRow, DEFAULT_NAME};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub token: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: String,
}

/// POST /login
///
/// Verifies the presented credential with the identity provider, creates the
/// profile on first login, and opens a session delivered as a cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let identity = match state.identity.verify(&req.token).await {
        Ok(identity) => identity,
        Err(IdentityError::Invalid) => return Err(AppError::AuthInvalid),
        Err(e) => {
            error!("identity verification failed: {e}");
            return Err(AppError::Identity(e.to_string()));
        }
    };

    let profile = match state.profiles.get(&identity.id).await? {
        Some(profile) => profile,
        None => {
            let name = req
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_NAME)
                .to_string();
            let profile = ProfileRow::new(identity.id.clone(), identity.email.clone(), name);
            state.profiles.create(&profile).await?;
            info!(user_id = %identity.id, "created profile on first login");
            profile
        }
    };

    let token = state.sessions.create(&identity.id).await?;
    let cookie = session_cookie(&token, state.config.session_ttl_secs);

    let body = LoginResponse {
        status: "ok",
        message: format!("Welcome, {}", profile.name),
    };
    let mut response = (StatusCode::OK, Json(body)).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?,
    );
    Ok(response)
}
