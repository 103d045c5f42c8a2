use std::sync::Arc;

use crate::assessment::benchmarks::BenchmarkTable;
use crate::auth::identity::IdentityGate;
use crate::auth::session::SessionStore;
use crate::coach::backend::CoachBackend;
use crate::coach::store::DialogueStore;
use crate::config::Config;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every remote collaborator sits behind a trait object so handlers never
/// reach for ambient clients, and tests can wire in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub dialogues: Arc<dyn DialogueStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub identity: Arc<dyn IdentityGate>,
    pub coach: Arc<dyn CoachBackend>,
    /// Read-only career benchmark table, built once at startup.
    pub benchmarks: Arc<BenchmarkTable>,
    pub config: Config,
}
