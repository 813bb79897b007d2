use crate::boolean::generator::BooleanGenerator;
use crate::boolean::session::SessionStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: BooleanGenerator,
    /// Live refinement sessions, keyed by id. In memory only.
    pub sessions: SessionStore,
    pub config: Config,
}
