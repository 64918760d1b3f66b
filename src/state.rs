//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AdminService, CompletionService, PriceM2Service};
use crate::config::AdminCredentials;
use crate::domain::diagnostics::TracingSink;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgBoroughRepository, PgCadastralRepository, PgConstructionTypeRepository,
};

pub type PgPriceM2Service = PriceM2Service<PgCadastralRepository>;
pub type PgCompletionService = CompletionService<PgBoroughRepository, PgConstructionTypeRepository>;
pub type PgAdminService =
    AdminService<PgBoroughRepository, PgConstructionTypeRepository, PgCadastralRepository>;

#[derive(Clone)]
pub struct AppState {
    pub price_service: Arc<PgPriceM2Service>,
    pub completion_service: Arc<PgCompletionService>,
    pub admin_service: Arc<PgAdminService>,
    pub cache: Arc<dyn CacheService>,
    /// `None` disables the admin panel.
    pub admin: Option<AdminCredentials>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into every service.
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        admin: Option<AdminCredentials>,
    ) -> Self {
        let records = Arc::new(PgCadastralRepository::new(pool.clone()));
        let boroughs = Arc::new(PgBoroughRepository::new(pool.clone()));
        let construction_types = Arc::new(PgConstructionTypeRepository::new(pool));

        Self {
            price_service: Arc::new(PriceM2Service::new(
                records.clone(),
                Arc::new(TracingSink),
            )),
            completion_service: Arc::new(CompletionService::new(
                boroughs.clone(),
                construction_types.clone(),
            )),
            admin_service: Arc::new(AdminService::new(boroughs, construction_types, records)),
            cache,
            admin,
        }
    }
}
