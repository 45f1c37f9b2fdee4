pub mod jargon;

use crate::handlers;
use crate::models::{Definition, ErrorResponse, Explanation, IdentifyRequest, Match, ServiceInfo};
use crate::server::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::system::get_service_info,
        handlers::system::health_check,
        handlers::jargon::define,
        handlers::jargon::explain,
        handlers::jargon::identify,
        handlers::jargon::identify_path,
        handlers::jargon::identify_llm,
        handlers::jargon::identify_llm_path
    ),
    components(schemas(
        Definition,
        Explanation,
        IdentifyRequest,
        Match,
        ServiceInfo,
        ErrorResponse
    )),
    tags(
        (name = "jargon", description = "Medical jargon definition and identification"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Create the main API router with state
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::get_service_info))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_v1_router())
}

/// Create the v1 API router with state
fn api_v1_router() -> Router<AppState> {
    Router::new().merge(jargon::routes())
}
