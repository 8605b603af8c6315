pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::readiness::handlers as readiness;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/opportunities/rank", post(matching::handle_rank))
        .route("/api/v1/peers/match", post(matching::handle_peer_match))
        .route("/api/v1/peers/suggest", post(matching::handle_peer_suggest))
        // Readiness API
        .route("/api/v1/readiness", post(readiness::handle_readiness))
        .route("/api/v1/report", post(readiness::handle_report))
        .with_state(state)
}
