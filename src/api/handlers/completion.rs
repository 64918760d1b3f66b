//! Handlers for the completion (autocomplete) endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use serde_json::json;

use crate::api::dto::aggregate::ErrorResponse;
use crate::application::services::completion_service::NOT_FOUND_MESSAGE;
use crate::domain::entities::{Borough, ConstructionType};
use crate::error::AppError;
use crate::infrastructure::cache::{get_json, set_json};
use crate::state::AppState;

const BOROUGHS_KEY: &str = "completion:alcaldia";
const CONSTRUCTION_TYPES_KEY: &str = "completion:uso_construccion";

/// Parses a path id; anything that is not an integer cannot name a row.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(NOT_FOUND_MESSAGE, json!({ "id": raw })))
}

/// Lists boroughs as `{id, name}` items.
#[utoipa::path(
    get,
    path = "/price-m2/completion/alcaldia",
    tag = "completion",
    responses((status = 200, body = [Borough]))
)]
pub async fn list_boroughs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Borough>>, AppError> {
    if let Some(cached) = get_json(state.cache.as_ref(), BOROUGHS_KEY).await {
        return Ok(Json(cached));
    }

    let boroughs = state.completion_service.list_boroughs().await?;
    set_json(state.cache.as_ref(), BOROUGHS_KEY, &boroughs).await;

    Ok(Json(boroughs))
}

#[utoipa::path(
    get,
    path = "/price-m2/completion/alcaldia/{id}",
    tag = "completion",
    params(("id" = i64, Path, description = "Borough id")),
    responses(
        (status = 200, body = Borough),
        (status = 404, body = ErrorResponse),
    )
)]
pub async fn get_borough_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Borough>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.completion_service.get_borough(id).await?))
}

/// Lists construction types as `{id, name}` items.
#[utoipa::path(
    get,
    path = "/price-m2/completion/uso_construccion",
    tag = "completion",
    responses((status = 200, body = [ConstructionType]))
)]
pub async fn list_construction_types_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConstructionType>>, AppError> {
    if let Some(cached) = get_json(state.cache.as_ref(), CONSTRUCTION_TYPES_KEY).await {
        return Ok(Json(cached));
    }

    let types = state.completion_service.list_construction_types().await?;
    set_json(state.cache.as_ref(), CONSTRUCTION_TYPES_KEY, &types).await;

    Ok(Json(types))
}

#[utoipa::path(
    get,
    path = "/price-m2/completion/uso_construccion/{id}",
    tag = "completion",
    params(("id" = i64, Path, description = "Construction type id")),
    responses(
        (status = 200, body = ConstructionType),
        (status = 404, body = ErrorResponse),
    )
)]
pub async fn get_construction_type_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConstructionType>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.completion_service.get_construction_type(id).await?))
}
