//! Session store — opaque UUID tokens mapped to identity ids in Redis with a
//! TTL, delivered to clients as an HttpOnly cookie.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use redis::AsyncCommands;
use thiserror::Error;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

/// Carried in `AppState` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Opens a session for `user_id` and returns the opaque token.
    async fn create(&self, user_id: &str) -> Result<String, SessionError>;

    /// Resolves a token to its identity id; `None` for unknown or expired
    /// tokens.
    async fn lookup(&self, token: &str) -> Result<Option<String>, SessionError>;
}

pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: &str) -> Result<String, SessionError> {
        let token = Uuid::new_v4().to_string();
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn
            .set_ex(session_key(&token), user_id, self.ttl_secs)
            .await?;
        Ok(token)
    }

    async fn lookup(&self, token: &str) -> Result<Option<String>, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let user_id: Option<String> = conn.get(session_key(token)).await?;
        Ok(user_id)
    }
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// `Set-Cookie` value for a freshly created session token.
pub fn session_cookie(token: &str, ttl_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

/// Extracts the session token from a request's `Cookie` header, if any.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
}
