//! Axum route handlers for the Cover Letter API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::letters::generator::{GenerationRequest, LetterSource};
use crate::letters::reviser::seed_transcript;
use crate::models::message::{Message, Role};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub letter_id: Uuid,
    pub cover_letter: String,
    pub source: LetterSource,
    /// Fresh revision transcript; the caller appends to it from here on.
    pub transcript: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct ReviseRequest {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ReviseResponse {
    pub message: Message,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters
///
/// Generates a cover letter. Provider failures never surface here; the
/// response carries whichever step of the chain produced the text.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if request.resume.trim().is_empty() {
        return Err(AppError::Validation("resume cannot be empty".to_string()));
    }

    let letter_id = Uuid::new_v4();
    let letter = state.generator.generate(&request).await;
    info!("Cover letter {letter_id} ready ({:?})", letter.source);

    Ok(Json(GenerateResponse {
        letter_id,
        cover_letter: letter.text,
        source: letter.source,
        transcript: seed_transcript(),
    }))
}

/// POST /api/v1/cover-letters/revise
///
/// Returns the next assistant turn for a revision transcript that ends with
/// the user's new message.
pub async fn handle_revise(
    State(state): State<AppState>,
    Json(request): Json<ReviseRequest>,
) -> Result<Json<ReviseResponse>, AppError> {
    let last = request
        .messages
        .last()
        .ok_or_else(|| AppError::Validation("messages cannot be empty".to_string()))?;

    if last.role != Role::User || last.content.trim().is_empty() {
        return Err(AppError::Validation(
            "the last message must be a non-empty user message".to_string(),
        ));
    }

    let message = state.reviser.continue_conversation(&request.messages).await;
    Ok(Json(ReviseResponse { message }))
}
