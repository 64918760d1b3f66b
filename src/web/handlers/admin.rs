//! Admin panel pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde_json::json;

use crate::api::dto::pagination::{RecordQueryParams, total_pages};
use crate::application::services::CatalogSummary;
use crate::application::services::completion_service::{
    BOROUGH_ACTUAL_LIMIT, CONSTRUCTION_TYPE_ACTUAL_LIMIT,
};
use crate::domain::entities::{Borough, CadastralRecord, ConstructionType};
use crate::domain::repositories::RecordFilter;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct OverviewTemplate {
    pub summary: CatalogSummary,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/boroughs.html")]
pub struct BoroughsTemplate {
    pub boroughs: Vec<Borough>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/construction_types.html")]
pub struct ConstructionTypesTemplate {
    pub construction_types: Vec<ConstructionType>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/records.html")]
pub struct RecordsTemplate {
    pub records: Vec<CadastralRecord>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub zip_code: String,
}

impl RecordsTemplate {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `GET /admin`
pub async fn overview_handler(State(st): State<AppState>) -> Result<OverviewTemplate, AppError> {
    Ok(OverviewTemplate {
        summary: st.admin_service.summary().await?,
    })
}

/// `GET /admin/boroughs`
pub async fn boroughs_handler(State(st): State<AppState>) -> Result<BoroughsTemplate, AppError> {
    Ok(BoroughsTemplate {
        boroughs: st.admin_service.boroughs(BOROUGH_ACTUAL_LIMIT).await?,
    })
}

/// `GET /admin/construction-types`
pub async fn construction_types_handler(
    State(st): State<AppState>,
) -> Result<ConstructionTypesTemplate, AppError> {
    Ok(ConstructionTypesTemplate {
        construction_types: st
            .admin_service
            .construction_types(CONSTRUCTION_TYPE_ACTUAL_LIMIT)
            .await?,
    })
}

/// `GET /admin/records?page=&page_size=&zip_code=`
pub async fn records_handler(
    State(st): State<AppState>,
    Query(params): Query<RecordQueryParams>,
) -> Result<RecordsTemplate, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let filter = RecordFilter::new(offset, limit).with_zip_code(params.zip_code.clone());
    let page = st.admin_service.records(filter).await?;
    let page_size = params.pagination.page_size();

    Ok(RecordsTemplate {
        total_pages: total_pages(page.total, page_size),
        records: page.items,
        total: page.total,
        page: params.pagination.page(),
        page_size,
        zip_code: params.zip_code.unwrap_or_default(),
    })
}
