//! OpenAPI document and the pages rendering it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

use crate::api::dto::aggregate::{AggregateResponse, ErrorResponse};
use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::entities::{AggregationKind, AggregationResult, Borough, ConstructionType};

/// Where the pages load the document from.
pub const SCHEMA_URL: &str = "/price-m2/doc/schema/download";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Price m2",
        description = "Precio por m2 agregado de la alcaldía Álvaro Obregón del Gobierno de la Ciudad de México."
    ),
    paths(
        super::aggregate::aggregate_handler,
        super::completion::list_boroughs_handler,
        super::completion::get_borough_handler,
        super::completion::list_construction_types_handler,
        super::completion::get_construction_type_handler,
        super::health::health_handler,
    ),
    components(schemas(
        AggregateResponse,
        AggregationResult,
        AggregationKind,
        ErrorResponse,
        Borough,
        ConstructionType,
        HealthResponse,
        HealthChecks,
        CheckStatus,
    ))
)]
pub struct ApiDoc;

/// `GET /price-m2/doc/schema/download`
pub async fn schema_handler() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[derive(Template, WebTemplate)]
#[template(path = "docs/swagger.html")]
pub struct SwaggerTemplate {
    pub schema_url: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "docs/redoc.html")]
pub struct RedocTemplate {
    pub schema_url: &'static str,
}

/// `GET /price-m2/doc/schema/swagger-ui`
pub async fn swagger_handler() -> impl IntoResponse {
    SwaggerTemplate {
        schema_url: SCHEMA_URL,
    }
}

/// `GET /price-m2/doc/schema/redoc`
pub async fn redoc_handler() -> impl IntoResponse {
    RedocTemplate {
        schema_url: SCHEMA_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_endpoint() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();

        assert!(paths.contains_key("/price-m2/zip-codes/{zip_code}/aggregate/{aggregate}"));
        assert!(paths.contains_key("/price-m2/completion/alcaldia"));
        assert!(paths.contains_key("/price-m2/completion/uso_construccion/{id}"));
        assert!(paths.contains_key("/health"));
    }

    #[test]
    fn test_pages_point_at_schema() {
        let swagger = SwaggerTemplate {
            schema_url: SCHEMA_URL,
        }
        .render()
        .unwrap();
        let redoc = RedocTemplate {
            schema_url: SCHEMA_URL,
        }
        .render()
        .unwrap();

        assert!(swagger.contains(SCHEMA_URL));
        assert!(redoc.contains(SCHEMA_URL));
    }
}
