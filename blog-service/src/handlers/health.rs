use crate::config::SERVICE_NAME;
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Probes report only the outcome; the store error is logged.
async fn probe_store(state: &AppState) -> Result<(), AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Store health check failed");
        AppError::ServiceUnavailable
    })
}

pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    probe_store(&state).await?;

    Ok(Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    probe_store(&state).await?;
    Ok(StatusCode::OK)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
