//! Axum route handlers for the Interview API.

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::types::{
    ConversationTurn, Difficulty, FeedbackResult, InterviewType, Provenance,
};
use crate::state::AppState;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub difficulty: Difficulty,
    #[serde(default = "default_question_count")]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<String>,
    pub source: Provenance,
}

#[derive(Debug, Deserialize)]
pub struct ConversationRequest {
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_initial: bool,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub message: String,
    pub source: Provenance,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub questions: Vec<String>,
    /// Question text → answer text. Missing entries count as unanswered.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    #[serde(flatten)]
    pub result: FeedbackResult,
    pub source: Provenance,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/questions
///
/// Generates a practice question set. Always succeeds once the request is valid.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    if request.count == 0 || request.count > MAX_QUESTION_COUNT {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_QUESTION_COUNT}"
        )));
    }

    let generated = state
        .interviewer
        .generate_questions(request.interview_type, request.difficulty, request.count)
        .await;

    Ok(Json(GenerateQuestionsResponse {
        questions: generated.value,
        source: generated.source,
    }))
}

/// POST /api/v1/interview/respond
///
/// Returns the interviewer's next line for the supplied dialogue.
pub async fn handle_conversation_turn(
    State(state): State<AppState>,
    Json(request): Json<ConversationRequest>,
) -> Result<Json<ConversationResponse>, AppError> {
    let generated = state
        .interviewer
        .get_conversational_response(
            &request.history,
            request.interview_type,
            request.difficulty,
            request.is_initial,
        )
        .await;

    Ok(Json(ConversationResponse {
        message: generated.value,
        source: generated.source,
    }))
}

/// POST /api/v1/interview/feedback
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if request.questions.iter().all(|q| q.trim().is_empty()) {
        return Err(AppError::Validation(
            "questions must contain at least one question".to_string(),
        ));
    }

    let generated = state
        .interviewer
        .generate_feedback(
            &request.questions,
            &request.answers,
            request.interview_type,
            request.difficulty,
        )
        .await;

    Ok(Json(FeedbackResponse {
        result: generated.value,
        source: generated.source,
    }))
}
