//! Chat and history handlers.

use crate::{
    AppState,
    types::{AppError, ChatRequest, ChatResponse, HistoryResponse, Result},
};
use axum::{Json, extract::State};

/// Ask a question about the ingested documents.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer with sources and updated history", body = ChatResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "No documents ingested yet"),
        (status = 502, description = "Provider failure"),
        (status = 504, description = "Provider timeout")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if payload.question.trim().is_empty() {
        return Err(AppError::InvalidInput("Question required".to_string()));
    }

    let result = state.engine.answer(&payload.question).await?;

    Ok(Json(ChatResponse {
        answer: result.answer,
        sources: result.sources,
        history: result.history,
    }))
}

/// Get the current conversation history.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Conversation history", body = HistoryResponse)
    ),
    tag = "chat"
)]
pub async fn history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        messages: state.engine.history().await,
    })
}
