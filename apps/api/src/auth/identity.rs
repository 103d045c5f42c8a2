//! Identity Gate — verification of login credentials against the external
//! identity provider. The service never inspects tokens itself; it forwards
//! them and trusts the provider's verdict.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// The `(identity id, email)` pair the provider vouches for.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider examined the credential and rejected it.
    #[error("credential rejected by identity provider")]
    Invalid,

    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity provider error (status {status})")]
    Provider { status: u16 },
}

/// Carried in `AppState` as `Arc<dyn IdentityGate>`.
#[async_trait]
pub trait IdentityGate: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    user_id: String,
    email: Option<String>,
}

/// Token verification over HTTP against the provider's introspection
/// endpoint.
pub struct HttpIdentityGate {
    client: reqwest::Client,
    verify_url: String,
    api_key: String,
}

impl HttpIdentityGate {
    pub fn new(verify_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            verify_url,
            api_key,
        }
    }
}

#[async_trait]
impl IdentityGate for HttpIdentityGate {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let response = self
            .client
            .post(&self.verify_url)
            .header("x-api-key", &self.api_key)
            .json(&VerifyRequest { token })
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            debug!("identity provider rejected credential ({status})");
            return Err(IdentityError::Invalid);
        }
        if !status.is_success() {
            return Err(IdentityError::Provider {
                status: status.as_u16(),
            });
        }

        let verified: VerifyResponse = response.json().await?;
        Ok(VerifiedIdentity {
            id: verified.user_id,
            email: verified.email,
        })
    }
}
