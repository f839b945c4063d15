use crate::generation::gateway::GenerationGateway;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Wraps the model backend. Tests swap in a scripted one.
    pub gateway: GenerationGateway,
}
