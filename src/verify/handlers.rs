use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    app_state::AppState,
    verify::dtos::{ErrorResponse, VerifyRequest, VerifyResponse},
};

#[utoipa::path(
    post,
    path = "/verify",
    tag = "verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Credibility verdict", body = VerifyResponse),
        (status = 400, description = "Missing input, invalid URL or no usable text", body = ErrorResponse),
        (status = 500, description = "Unexpected failure while processing the page", body = ErrorResponse)
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(error = %rejection, "rejected request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid JSON data".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.verifier.verify(&request).await {
        Ok(verification) => Json(VerifyResponse::from(&verification.score)).into_response(),
        Err(err) => err.into_response(),
    }
}
