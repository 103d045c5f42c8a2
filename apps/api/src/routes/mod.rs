pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::assessment::handlers as assessment_handlers;
use crate::auth::handlers as auth_handlers;
use crate::coach::handlers as coach_handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

/// Plain `{"status": "ok"}` acknowledgement body.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/login", post(auth_handlers::login))
        .route(
            "/submit-onboarding",
            post(profile_handlers::submit_onboarding),
        )
        .route("/submit-test", post(assessment_handlers::submit_test))
        .route("/comm-builder", post(coach_handlers::comm_builder))
        .route("/profile/:user_id", get(profile_handlers::get_profile))
        .route(
            "/assessment/questions",
            get(assessment_handlers::questions),
        )
        .route("/coach/history", get(coach_handlers::history))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::assessment::benchmarks::BenchmarkTable;
    use crate::auth::identity::testing::StaticIdentityGate;
    use crate::auth::session::testing::MemorySessionStore;
    use crate::coach::backend::testing::ScriptedCoach;
    use crate::coach::handlers::{BACKEND_FAILURE_REPLY, EMPTY_MESSAGE_REPLY};
    use crate::coach::store::memory::MemoryDialogueStore;
    use crate::config::Config;
    use crate::profile::store::memory::MemoryProfileStore;
    use crate::state::AppState;

    use super::build_router;

    const TOKEN: &str = "good-token";
    const USER_ID: &str = "uid-1";

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            redis_url: "redis://unused".to_string(),
            identity_verify_url: "http://unused/verify".to_string(),
            identity_api_key: "unused".to_string(),
            anthropic_api_key: "unused".to_string(),
            port: 0,
            session_ttl_secs: 3600,
            rust_log: "info".to_string(),
        }
    }

    fn test_state(coach: ScriptedCoach) -> (AppState, Arc<ScriptedCoach>) {
        let coach = Arc::new(coach);
        let state = AppState {
            profiles: Arc::new(MemoryProfileStore::default()),
            dialogues: Arc::new(MemoryDialogueStore::default()),
            sessions: Arc::new(MemorySessionStore::default()),
            identity: Arc::new(StaticIdentityGate::with_token(
                TOKEN,
                USER_ID,
                Some("student@example.com"),
            )),
            coach: coach.clone(),
            benchmarks: Arc::new(BenchmarkTable::builtin()),
            config: test_config(),
        };
        (state, coach)
    }

    async fn send(state: &AppState, request: Request<Body>) -> Response {
        build_router(state.clone()).oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Logs in and returns the session cookie pair for follow-up requests.
    async fn login(state: &AppState) -> String {
        let response = send(
            state,
            post_json("/login", None, &json!({"token": TOKEN, "name": "Ada"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login must set a session cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn example_answers() -> Value {
        json!({
            "communication": [4, 5, 4],
            "emotional-intelligence": [3, 3, 3],
            "problem-solving": [5, 5, 5, 5],
            "leadership": [2, 2],
            "resilience": [4, 4, 4]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let response = send(&state, get_request("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_first_login_creates_default_profile() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));

        let response = send(
            &state,
            post_json("/login", None, &json!({"token": TOKEN, "name": "Ada"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["message"].as_str().unwrap().contains("Ada"));

        let cookie = login(&state).await;
        let response = send(
            &state,
            get_request(&format!("/profile/{USER_ID}"), Some(&cookie)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let profile = body_json(response).await;
        assert_eq!(profile["testCompleted"], false);
        assert_eq!(profile["name"], "Ada");
        assert!(profile.get("awarenessScore").is_none());
        assert!(profile["benchmark"].is_null());
        for key in [
            "communication",
            "emotional-intelligence",
            "problem-solving",
            "leadership",
            "resilience",
        ] {
            assert_eq!(profile["scores"][key], 0.0);
        }
    }

    #[tokio::test]
    async fn test_login_without_name_uses_placeholder() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let response = send(&state, post_json("/login", None, &json!({"token": TOKEN}))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("Student"));
    }

    #[tokio::test]
    async fn test_login_with_bad_token_rejected() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let response = send(
            &state,
            post_json("/login", None, &json!({"token": "forged"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_submit_test_without_session_unauthorized() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let response = send(&state, post_json("/submit-test", None, &example_answers())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["status"], "error");
    }

    #[tokio::test]
    async fn test_submit_test_persists_scores() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let response = send(
            &state,
            post_json("/submit-test", Some(&cookie), &example_answers()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");

        let response = send(
            &state,
            get_request(&format!("/profile/{USER_ID}"), Some(&cookie)),
        )
        .await;
        let profile = body_json(response).await;
        assert_eq!(profile["testCompleted"], true);
        assert_eq!(profile["awarenessScore"], 73);
        assert_eq!(profile["scores"]["communication"], 8.7);
        assert_eq!(profile["scores"]["emotional-intelligence"], 6.0);
        assert_eq!(profile["scores"]["problem-solving"], 10.0);
        assert_eq!(profile["scores"]["leadership"], 4.0);
        assert_eq!(profile["scores"]["resilience"], 8.0);
    }

    #[tokio::test]
    async fn test_submit_test_rejects_out_of_range_answers() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let mut answers = example_answers();
        answers["leadership"] = json!([2, 9]);
        let response = send(&state, post_json("/submit-test", Some(&cookie), &answers)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], "error");
    }

    #[tokio::test]
    async fn test_onboarding_records_career_and_benchmark() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let response = send(
            &state,
            post_json(
                "/submit-onboarding",
                Some(&cookie),
                &json!({"nextStep": "Apply for internships", "career": "Law"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");

        let response = send(
            &state,
            get_request(&format!("/profile/{USER_ID}"), Some(&cookie)),
        )
        .await;
        let profile = body_json(response).await;
        assert_eq!(profile["targetCareer"], "Law");
        assert_eq!(profile["nextStep"], "Apply for internships");
        assert_eq!(profile["benchmark"], json!([9, 7, 7, 8, 8]));
    }

    #[tokio::test]
    async fn test_onboarding_rejects_blank_fields() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let response = send(
            &state,
            post_json(
                "/submit-onboarding",
                Some(&cookie),
                &json!({"nextStep": "  ", "career": "Law"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_foreign_id_not_found() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let response = send(&state, get_request("/profile/somebody-else", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_comm_builder_empty_message_skips_backend() {
        let (state, coach) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let response = send(
            &state,
            post_json("/comm-builder", Some(&cookie), &json!({"message": "   "})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["reply"], EMPTY_MESSAGE_REPLY);
        assert_eq!(coach.call_count(), 0);
    }

    #[tokio::test]
    async fn test_comm_builder_unreadable_body_gets_same_fallback() {
        let (state, coach) = test_state(ScriptedCoach::replying("hi"));
        let cookie = login(&state).await;

        let request = Request::builder()
            .method("POST")
            .uri("/comm-builder")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &cookie)
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(&state, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["reply"], EMPTY_MESSAGE_REPLY);
        assert_eq!(coach.call_count(), 0);
    }

    #[tokio::test]
    async fn test_comm_builder_backend_failure_fallback() {
        let (state, _) = test_state(ScriptedCoach::failing());
        let cookie = login(&state).await;

        let response = send(
            &state,
            post_json(
                "/comm-builder",
                Some(&cookie),
                &json!({"message": "How do I sound more confident?"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["reply"], BACKEND_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_comm_builder_relays_reply_and_records_history() {
        let (state, coach) = test_state(ScriptedCoach::replying("Clarity: 8/10. Keep going!"));
        let cookie = login(&state).await;

        send(
            &state,
            post_json(
                "/submit-onboarding",
                Some(&cookie),
                &json!({"nextStep": "Practice interviews", "career": "Law"}),
            ),
        )
        .await;

        let response = send(
            &state,
            post_json(
                "/comm-builder",
                Some(&cookie),
                &json!({"message": "I led a moot court team last term."}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["reply"], "Clarity: 8/10. Keep going!");

        // The system instruction carries the recorded career.
        let systems = coach.systems.lock().unwrap();
        assert!(systems.last().unwrap().contains("Law"));
        drop(systems);

        let response = send(&state, get_request("/coach/history", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let history = body_json(response).await;
        let messages = history["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0]["userMessage"],
            "I led a moot court team last term."
        );
        assert_eq!(messages[0]["coachReply"], "Clarity: 8/10. Keep going!");
    }

    #[tokio::test]
    async fn test_comm_builder_without_career_uses_generic_context() {
        let (state, coach) = test_state(ScriptedCoach::replying("ok"));
        let cookie = login(&state).await;

        let response = send(
            &state,
            post_json(
                "/comm-builder",
                Some(&cookie),
                &json!({"message": "Hello coach"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let systems = coach.systems.lock().unwrap();
        assert!(systems.last().unwrap().contains("Professional"));
    }

    #[tokio::test]
    async fn test_questions_are_public() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let response = send(&state, get_request("/assessment/questions", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["questions"].as_array().unwrap().len(), 10);
        assert_eq!(body["questions"][0]["options"][4], "Strongly Agree");
    }

    #[tokio::test]
    async fn test_coach_history_requires_session() {
        let (state, _) = test_state(ScriptedCoach::replying("hi"));
        let response = send(&state, get_request("/coach/history", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
