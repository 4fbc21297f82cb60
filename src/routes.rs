use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    health::{self, HealthResponse},
    verify::{
        dtos::{ErrorResponse, VerifyRequest, VerifyResponse},
        handlers,
    },
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(handlers::verify, health::health_check),
    components(schemas(VerifyRequest, VerifyResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "verify", description = "News credibility checks"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Full application router: API routes, docs, and the static frontend for
/// every other path.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/verify", post(handlers::verify))
        .route("/api/verify", post(handlers::verify))
        .route("/healthz", get(health::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(CorsLayer::permissive())
}
