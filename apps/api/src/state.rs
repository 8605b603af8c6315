use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// The engine itself is stateless; only request limits live here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
