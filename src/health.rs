use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    /// `available` when a sequence classifier is configured, else `disabled`.
    classifier: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier = if state.verifier.analyzer().has_classifier() {
        "available"
    } else {
        "disabled"
    };
    debug!(classifier, "health check");
    Json(HealthResponse {
        status: "OK".to_string(),
        classifier: classifier.to_string(),
    })
}
