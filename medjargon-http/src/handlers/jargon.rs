use crate::error::AppError;
use crate::models::{Definition, ErrorResponse, Explanation, IdentifyRequest, Match};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};

/// Look up the definition of a medical term
#[utoipa::path(
    get,
    path = "/api/v1/define/{term}",
    tag = "jargon",
    responses(
        (status = 200, description = "Definition found", body = Definition),
        (status = 404, description = "Term not in the lexicon or has no definition", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("term" = String, Path, description = "Term to define, any casing")
    )
)]
#[axum::debug_handler]
pub async fn define(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Definition>, AppError> {
    Ok(Json(state.service.define(&term)?))
}

/// Definition of a term plus a plain-language rewrite
#[utoipa::path(
    get,
    path = "/api/v1/explain/{term}",
    tag = "jargon",
    responses(
        (status = 200, description = "Explanation produced", body = Explanation),
        (status = 404, description = "Term not in the lexicon or has no definition", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("term" = String, Path, description = "Term to explain, any casing")
    )
)]
#[axum::debug_handler]
pub async fn explain(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<Json<Explanation>, AppError> {
    Ok(Json(state.service.explain(&term).await?))
}

/// Find lexicon jargon in text passed in the path
#[utoipa::path(
    get,
    path = "/api/v1/identify/{text}",
    tag = "jargon",
    responses(
        (status = 200, description = "Jargon spans, empty when none", body = [Match]),
        (status = 400, description = "Text too long", body = ErrorResponse)
    ),
    params(
        ("text" = String, Path, description = "URL-encoded text to scan")
    )
)]
#[axum::debug_handler]
pub async fn identify_path(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> Result<Json<Vec<Match>>, AppError> {
    Ok(Json(state.service.identify(&text).await?))
}

/// Find lexicon jargon in text passed in the body
#[utoipa::path(
    post,
    path = "/api/v1/identify",
    tag = "jargon",
    request_body = IdentifyRequest,
    responses(
        (status = 200, description = "Jargon spans, empty when none", body = [Match]),
        (status = 400, description = "Text too long", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn identify(
    State(state): State<AppState>,
    Json(request): Json<IdentifyRequest>,
) -> Result<Json<Vec<Match>>, AppError> {
    Ok(Json(state.service.identify(&request.text).await?))
}

/// Find jargon with the LLM identifier, text passed in the path
#[utoipa::path(
    get,
    path = "/api/v1/identify_llm/{text}",
    tag = "jargon",
    responses(
        (status = 200, description = "Jargon spans, empty when none", body = [Match]),
        (status = 400, description = "Text too long", body = ErrorResponse),
        (status = 502, description = "LLM provider failed", body = ErrorResponse),
        (status = 503, description = "No LLM provider configured", body = ErrorResponse),
        (status = 504, description = "LLM provider timed out", body = ErrorResponse)
    ),
    params(
        ("text" = String, Path, description = "URL-encoded text to scan")
    )
)]
#[axum::debug_handler]
pub async fn identify_llm_path(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> Result<Json<Vec<Match>>, AppError> {
    Ok(Json(state.service.identify_llm(&text).await?))
}

/// Find jargon with the LLM identifier, text passed in the body
#[utoipa::path(
    post,
    path = "/api/v1/identify_llm",
    tag = "jargon",
    request_body = IdentifyRequest,
    responses(
        (status = 200, description = "Jargon spans, empty when none", body = [Match]),
        (status = 400, description = "Text too long", body = ErrorResponse),
        (status = 502, description = "LLM provider failed", body = ErrorResponse),
        (status = 503, description = "No LLM provider configured", body = ErrorResponse),
        (status = 504, description = "LLM provider timed out", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn identify_llm(
    State(state): State<AppState>,
    Json(request): Json<IdentifyRequest>,
) -> Result<Json<Vec<Match>>, AppError> {
    Ok(Json(state.service.identify_llm(&request.text).await?))
}
