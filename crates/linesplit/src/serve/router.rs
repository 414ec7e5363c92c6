use axum::{
    body::Bytes,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use chrono::Utc;
use linesplit_core::envelope::{self, ApiResponse};
use tower_http::cors::{Any, CorsLayer};

pub fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", any(process_text))
        .route("/api/process-text", any(process_text))
        .layer(cors)
}

async fn process_text(method: Method, body: Bytes) -> Response {
    let outcome = envelope::handle(method.as_str(), &body, Utc::now());

    if let Some(detail) = &outcome.internal_error {
        log::error!("text processing failed: {detail}");
    }

    log::debug!("{} -> {}", method, outcome.response.status);

    into_http(outcome.response)
}

fn into_http(response: ApiResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match response.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}
