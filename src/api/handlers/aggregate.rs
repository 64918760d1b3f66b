//! Handler for the price-per-area aggregation endpoint.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::aggregate::{
    AggregatePath, AggregateQuery, AggregateResponse, ErrorResponse,
    INVALID_CONSTRUCTION_TYPE_MESSAGE,
};
use crate::domain::entities::AggregationResult;
use crate::error::AppError;
use crate::infrastructure::cache::{aggregate_key, get_json, set_json};
use crate::state::AppState;

/// Aggregated price per m2 for a zip code and construction type.
///
/// Applies `avg`, `max` or `min` to `land_area / land_value - subsidy` and
/// `construction_area / land_value - subsidy` over the matching records of
/// the Álvaro Obregón borough.
///
/// Successful results are cached; errors never are.
#[utoipa::path(
    get,
    path = "/price-m2/zip-codes/{zip_code}/aggregate/{aggregate}",
    tag = "price-m2",
    summary = "Cálculo del precio agregado por m2.",
    params(AggregatePath, AggregateQuery),
    responses(
        (status = 200, description = "Precio por m2 agregado", body = AggregateResponse),
        (status = 400, description = "Error durante la evaluación", body = ErrorResponse),
        (status = 404, description = "Ruta no encontrada", body = ErrorResponse),
        (status = 500, description = "Error de base de datos", body = ErrorResponse),
    )
)]
pub async fn aggregate_handler(
    State(state): State<AppState>,
    Path(path): Path<AggregatePath>,
    Query(query): Query<AggregateQuery>,
) -> Result<Json<AggregateResponse>, AppError> {
    if path.validate().is_err() {
        return Err(AppError::not_found(
            "Not found",
            json!({ "zip_code": path.zip_code, "aggregate": path.aggregate }),
        ));
    }

    let construction_type = query.construction_type().ok_or_else(|| {
        AppError::bad_request(
            INVALID_CONSTRUCTION_TYPE_MESSAGE,
            json!({ "construction_type": query.construction_type }),
        )
    })?;

    metrics::counter!("price_m2_aggregate_requests_total", "kind" => path.aggregate.clone())
        .increment(1);

    let key = aggregate_key(&path.zip_code, &path.aggregate, construction_type);
    if let Some(cached) = get_json::<AggregationResult>(state.cache.as_ref(), &key).await {
        metrics::counter!("price_m2_cache_hits_total").increment(1);
        return Ok(Json(cached.into()));
    }

    let result = state
        .price_service
        .calculate(&path.zip_code, &path.aggregate, construction_type)
        .await
        .inspect_err(|_| {
            metrics::counter!("price_m2_aggregate_errors_total", "kind" => path.aggregate.clone())
                .increment(1);
        })?;

    set_json(state.cache.as_ref(), &key, &result).await;

    Ok(Json(result.into()))
}
