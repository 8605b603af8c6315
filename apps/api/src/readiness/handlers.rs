use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::User;
use crate::readiness::index::{calculate_readiness_index, readiness_level, ReadinessIndex};
use crate::readiness::report::{generate_user_report, AnalysisResult};

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct ReadinessLevelView {
    pub label: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub index: ReadinessIndex,
    pub level: ReadinessLevelView,
}

/// POST /api/v1/readiness
pub async fn handle_readiness(
    Json(request): Json<UserRequest>,
) -> Result<Json<ReadinessResponse>, AppError> {
    request.user.validate()?;

    let index = calculate_readiness_index(&request.user);
    let level = readiness_level(index.overall_score);
    Ok(Json(ReadinessResponse {
        index,
        level: ReadinessLevelView {
            label: level.label(),
            emoji: level.emoji(),
        },
    }))
}

/// POST /api/v1/report
pub async fn handle_report(
    Json(request): Json<UserRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    request.user.validate()?;

    let report = generate_user_report(&request.user);
    info!(
        user_id = %request.user.id,
        strength = report.profile_strength,
        "Generated readiness report"
    );
    Ok(Json(report))
}
