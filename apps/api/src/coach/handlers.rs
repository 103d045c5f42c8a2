use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::auth::extract::CurrentUser;
use crate::coach::prompts::{coach_system_prompt, FALLBACK_CAREER};
use crate::coach::store::HISTORY_LIMIT;
use crate::errors::AppError;
use crate::state::AppState;

/// Shown when the inbound message is missing, unreadable, or blank.
pub const EMPTY_MESSAGE_REPLY: &str =
    "It looks like your message was empty. Type the message you want to practice and I'll coach \
     you through it.";

/// Shown when the generative backend fails or times out.
pub const BACKEND_FAILURE_REPLY: &str =
    "Your coach is unavailable right now. Please try again in a moment.";

#[derive(Deserialize)]
pub struct CoachRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct CoachReply {
    pub reply: String,
}

/// POST /comm-builder
///
/// One coaching exchange: the user's message goes to the generative backend
/// under a career-contextualized system instruction, and the raw reply comes
/// back unmodified. Failures never surface upstream error text — the client
/// always gets a structured `{reply}` body.
pub async fn comm_builder(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Option<Json<CoachRequest>>,
) -> Response {
    let message = match payload.as_ref().map(|Json(req)| req.message.trim()) {
        Some(message) if !message.is_empty() => message,
        _ => {
            warn!(user_id = %user.id, "rejected empty or unreadable coach message");
            return (
                StatusCode::BAD_REQUEST,
                Json(CoachReply {
                    reply: EMPTY_MESSAGE_REPLY.to_string(),
                }),
            )
                .into_response();
        }
    };

    // A profile problem degrades to generic coaching rather than blocking
    // the exchange.
    let career = match state.profiles.get(&user.id).await {
        Ok(Some(profile)) => profile
            .target_career
            .unwrap_or_else(|| FALLBACK_CAREER.to_string()),
        Ok(None) => FALLBACK_CAREER.to_string(),
        Err(e) => {
            warn!(user_id = %user.id, "profile lookup failed, coaching without career context: {e}");
            FALLBACK_CAREER.to_string()
        }
    };

    let system = coach_system_prompt(&career);
    match state.coach.generate(&system, message).await {
        Ok(reply) => {
            if let Err(e) = state.dialogues.append(&user.id, message, &reply).await {
                warn!(user_id = %user.id, "failed to record dialogue turn: {e}");
            }
            info!(user_id = %user.id, career = %career, "coach reply delivered");
            (StatusCode::OK, Json(CoachReply { reply })).into_response()
        }
        Err(e) => {
            error!(user_id = %user.id, "coach backend call failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CoachReply {
                    reply: BACKEND_FAILURE_REPLY.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<crate::coach::store::DialogueTurnRow>,
}

/// GET /coach/history
pub async fn history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<HistoryResponse>, AppError> {
    let messages = state.dialogues.recent(&user.id, HISTORY_LIMIT).await?;
    Ok(Json(HistoryResponse { messages }))
}
