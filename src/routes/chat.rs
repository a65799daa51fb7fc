use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, info};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, ErrorResponse},
    state::SharedState,
};

pub const USAGE_HINT: &str = "Usa POST /api/chat con { message: 'tu pregunta' } en el body.";
pub const EMPTY_MESSAGE: &str = "El mensaje no puede estar vacío.";

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected chat body");
        AppError::InvalidInput(USAGE_HINT.to_string())
    })?;

    let message = payload
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::InvalidInput(EMPTY_MESSAGE.to_string()))?;

    info!(message, "new assistant question");

    let reply = state.relay.reply(message).await?;

    Ok(Json(ChatResponse { reply }))
}

// Browsers hitting the endpoint directly get a hint instead of 405.
pub async fn usage_handler() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: USAGE_HINT.to_string(),
    })
}
