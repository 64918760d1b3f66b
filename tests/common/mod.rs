#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;

use price_m2::config::AdminCredentials;
use price_m2::domain::entities::NewCadastralRecord;
use price_m2::infrastructure::cache::NullCache;
use price_m2::state::AppState;
use price_m2::web::middleware::admin_auth::hash_password;

pub const ZIP_CODE: &str = "10101";
pub const CONSTRUCTION_TYPE: i64 = 1;
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

/// `(land_area, construction_area, land_value, subsidy)` of the two
/// reference records under [`ZIP_CODE`] and [`CONSTRUCTION_TYPE`].
pub const REFERENCE_RECORDS: [(f64, f64, f64, f64); 2] =
    [(1000.0, 600.0, 10.0, 23.0), (1500.0, 900.0, 17.0, 31.0)];

pub fn new_record(
    zip_code: &str,
    construction_type_id: i64,
    (land_area, construction_area, land_value, subsidy): (f64, f64, f64, f64),
) -> NewCadastralRecord {
    NewCadastralRecord {
        borough_id: 1,
        construction_type_id,
        zip_code: zip_code.to_string(),
        land_area,
        construction_area,
        land_value,
        subsidy,
    }
}

pub fn reference_records() -> Vec<NewCadastralRecord> {
    REFERENCE_RECORDS
        .into_iter()
        .map(|r| new_record(ZIP_CODE, CONSTRUCTION_TYPE, r))
        .collect()
}

pub async fn insert_record(pool: &PgPool, record: &NewCadastralRecord) {
    sqlx::query(
        "INSERT INTO cadastral_records \
         (borough_id, construction_type_id, zip_code, land_area, construction_area, land_value, subsidy) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(record.borough_id)
    .bind(record.construction_type_id)
    .bind(&record.zip_code)
    .bind(record.land_area)
    .bind(record.construction_area)
    .bind(record.land_value)
    .bind(record.subsidy)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seed_reference_records(pool: &PgPool) {
    for record in reference_records() {
        insert_record(pool, &record).await;
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), Arc::new(NullCache), None)
}

pub fn create_admin_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(NullCache),
        Some(AdminCredentials {
            user: ADMIN_USER.to_string(),
            password_sha256: hash_password(ADMIN_PASSWORD),
        }),
    )
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
