use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::session::session_token_from_headers;
use crate::errors::AppError;
use crate::state::AppState;

/// Request-scoped identity, resolved from the session cookie.
///
/// Every route that touches user data takes this extractor; routes without
/// it (`/login`, `/health`, the question bank) are deliberately public.
pub struct CurrentUser {
    pub id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;

        let user_id = state
            .sessions
            .lookup(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser { id: user_id })
    }
}
