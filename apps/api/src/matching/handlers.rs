//! Axum route handlers for opportunity and peer matching.
//!
//! Each handler validates the records it was handed and runs one engine call.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::match_scorer::{calculate_match_score, MatchResult};
use crate::matching::peer::{calculate_peer_match, suggest_peers, PeerMatchResult, PeerSuggestion};
use crate::matching::ranking::{rank_opportunities, RankedOpportunity};
use crate::models::{Opportunity, User};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub user: User,
    pub opportunity: Opportunity,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub user: User,
    pub opportunities: Vec<Opportunity>,
}

#[derive(Debug, Deserialize)]
pub struct PeerMatchRequest {
    pub user: User,
    pub candidate: User,
}

#[derive(Debug, Deserialize)]
pub struct PeerSuggestRequest {
    pub user: User,
    pub candidates: Vec<User>,
    pub limit: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
pub async fn handle_match(
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    request.user.validate()?;
    request.opportunity.validate()?;

    Ok(Json(calculate_match_score(&request.user, &request.opportunity)))
}

/// POST /api/v1/opportunities/rank
///
/// Returns the whole catalogue in ranked order; filtering is left to the caller.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<Vec<RankedOpportunity>>, AppError> {
    check_catalogue_size(request.opportunities.len(), &state)?;
    request.user.validate()?;
    for opportunity in &request.opportunities {
        opportunity.validate()?;
    }

    let ranked = rank_opportunities(&request.user, &request.opportunities);
    info!(
        user_id = %request.user.id,
        opportunities = ranked.len(),
        "Ranked opportunity catalogue"
    );
    Ok(Json(ranked))
}

/// POST /api/v1/peers/match
pub async fn handle_peer_match(
    Json(request): Json<PeerMatchRequest>,
) -> Result<Json<PeerMatchResult>, AppError> {
    request.user.validate()?;
    request.candidate.validate()?;

    Ok(Json(calculate_peer_match(&request.user, &request.candidate)))
}

/// POST /api/v1/peers/suggest
pub async fn handle_peer_suggest(
    State(state): State<AppState>,
    Json(request): Json<PeerSuggestRequest>,
) -> Result<Json<Vec<PeerSuggestion>>, AppError> {
    check_catalogue_size(request.candidates.len(), &state)?;
    request.user.validate()?;
    for candidate in &request.candidates {
        candidate.validate()?;
    }

    let limit = request.limit.unwrap_or(state.config.peer_suggestion_limit);
    let suggestions = suggest_peers(&request.user, &request.candidates, limit);
    info!(
        user_id = %request.user.id,
        candidates = request.candidates.len(),
        suggested = suggestions.len(),
        "Suggested peers"
    );
    Ok(Json(suggestions))
}

fn check_catalogue_size(len: usize, state: &AppState) -> Result<(), AppError> {
    let max = state.config.max_catalogue_size;
    if len > max {
        return Err(AppError::PayloadTooLarge(format!(
            "{len} records exceeds the limit of {max} per request"
        )));
    }
    Ok(())
}
