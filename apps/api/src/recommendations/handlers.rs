//! Axum route handlers for the Recommendations API.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::recommendations::{recommend, JobListing, RecommendationQuery};

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub listings: Vec<JobListing>,
}

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    Json(query): Json<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if query.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    Ok(Json(RecommendationResponse {
        listings: recommend(&query, Utc::now()),
    }))
}
