use crate::handlers::{define, explain, identify, identify_llm, identify_llm_path, identify_path};
use crate::server::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Create the jargon routes with state
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/define/{term}", get(define))
        .route("/explain/{term}", get(explain))
        .route("/identify", post(identify))
        .route("/identify/{text}", get(identify_path))
        .route("/identify_llm", post(identify_llm))
        .route("/identify_llm/{text}", get(identify_llm_path))
}
