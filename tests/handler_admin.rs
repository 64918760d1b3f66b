mod common;

use axum::{Router, middleware};
use axum_test::TestServer;
use price_m2::state::AppState;
use price_m2::web::middleware::admin_auth;
use price_m2::web::routes::protected_routes;
use sqlx::PgPool;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest(
            "/admin",
            protected_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                admin_auth::layer,
            )),
        )
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_admin_requires_credentials(pool: PgPool) {
    let server = server(common::create_admin_state(pool));

    let response = server.get("/admin/boroughs").await;

    response.assert_status_unauthorized();
    assert!(response.headers().contains_key("www-authenticate"));

    server
        .get("/admin/boroughs")
        .authorization("Basic YWRtaW46d3Jvbmc=")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_admin_pages_render(pool: PgPool) {
    common::seed_reference_records(&pool).await;
    let server = server(common::create_admin_state(pool));
    // admin:s3cret
    let auth = "Basic YWRtaW46czNjcmV0";

    let overview = server.get("/admin").authorization(auth).await;
    overview.assert_status_ok();
    assert!(overview.text().contains("Registros de catastro"));

    let types = server
        .get("/admin/construction-types")
        .authorization(auth)
        .await;
    types.assert_status_ok();
    assert!(types.text().contains("Habitacional y comercial"));

    let records = server
        .get("/admin/records")
        .add_query_param("zip_code", common::ZIP_CODE)
        .authorization(auth)
        .await;
    records.assert_status_ok();
    assert!(records.text().contains("2 registros"));

    server
        .get("/admin/records?page_size=5")
        .authorization(auth)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_admin_disabled_without_credentials(pool: PgPool) {
    let server = server(common::create_test_state(pool));

    server
        .get("/admin")
        .authorization("Basic YWRtaW46czNjcmV0")
        .await
        .assert_status_not_found();
}
