use crate::models::ServiceInfo;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Json};

/// Get service information
///
/// Returns the loaded data sizes and which LLM features are available.
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    )
)]
#[axum::debug_handler]
pub async fn get_service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.service.info())
}

/// Health check endpoint for container health monitoring
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
