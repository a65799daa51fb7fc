// src/routes/mod.rs
pub mod chat;

use std::{any::Any, path::Path};

use crate::{message::ChatResponse, services::relay::FALLBACK_INTERNAL, state::SharedState};
use axum::{
    Json, Router,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chat::{chat_handler, usage_handler};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

pub const WELCOME: &str = "Servidor Adoración Celestial funcionando correctamente.";

/// Chat API plus the widget's static files from `static_dir`.
pub fn create_router(static_dir: &Path) -> Router<SharedState> {
    Router::new()
        .route("/", get(|| async { WELCOME }))
        .route("/api/chat", get(usage_handler).post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

/// Any panic while handling a request still answers with a chat bubble.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(detail, "internal error while handling request");

    (
        StatusCode::OK,
        Json(ChatResponse {
            reply: FALLBACK_INTERNAL.to_string(),
        }),
    )
        .into_response()
}
