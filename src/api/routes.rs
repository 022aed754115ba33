use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::extract::{build_prompt, extract_text, truncate, MAX_BODY_BYTES};
use crate::llm::MODEL_ID;
use crate::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn create_router(app_state: AppState) -> Router {
    // Unmatched methods on known paths fall back to 404 rather than the
    // default 405, matching the single catch-all of the routing contract.
    Router::new()
        .route("/", get(index_handler).fallback(not_found_handler))
        .route(
            "/summarize",
            post(summarize_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

async fn summarize_handler(State(state): State<AppState>, req: Request) -> Response {
    match process_summarize(&state, req).await {
        // A bare String responds with 200 and text/plain.
        Ok(summary) => summary.into_response(),
        Err(err) => {
            match &err {
                AppError::EmptyInput => info!("Rejected request without text content"),
                other => error!("Summarization failed: {}", other),
            }
            err.into_response()
        }
    }
}

async fn process_summarize(state: &AppState, req: Request) -> Result<String> {
    let text = extract_text(req).await;
    if text.trim().is_empty() {
        return Err(AppError::EmptyInput);
    }

    let prompt = build_prompt(truncate(&text));
    info!(
        "Summarizing {} chars of input with model {}",
        text.chars().count(),
        MODEL_ID
    );

    let output = state
        .ai
        .run(MODEL_ID, &prompt)
        .await
        .map_err(|e| AppError::Inference(e.to_string()))?;

    Ok(output.into_text())
}
