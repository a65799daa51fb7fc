// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

/// Failures that reach the caller as a structured `{ "error": ... }` body.
///
/// Upstream and parse failures never show up here: the relay turns them into
/// a fallback reply before the handler returns.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    /// Earlier deployments disagreed here: some sent a 200 fallback reply,
    /// others a 500 error. This one always answers 500 so clients can tell a
    /// misconfigured server from a model answer.
    #[error("El asistente no está configurado (falta {0}).")]
    Unconfigured(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
