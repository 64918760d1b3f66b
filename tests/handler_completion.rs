mod common;

use axum::Router;
use axum_test::TestServer;
use price_m2::api::routes::public_routes;
use serde_json::{Value, json};
use sqlx::PgPool;

fn server(pool: PgPool) -> TestServer {
    let app = Router::new()
        .nest("/price-m2", public_routes())
        .with_state(common::create_test_state(pool));

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_list_boroughs(pool: PgPool) {
    let response = server(pool).get("/price-m2/completion/alcaldia").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!([{"id": 1, "name": "Álvaro Obregón"}])
    );
}

#[sqlx::test]
async fn test_list_construction_types_is_ordered(pool: PgPool) {
    let response = server(pool)
        .get("/price-m2/completion/uso_construccion")
        .await;

    response.assert_status_ok();
    let items = response.json::<Vec<Value>>();
    assert_eq!(items.len(), 7);
    assert_eq!(items[0], json!({"id": 1, "name": "Áreas verdes"}));
    assert_eq!(items[6], json!({"id": 7, "name": "Sin Zonificación"}));
}

#[sqlx::test]
async fn test_get_construction_type(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/price-m2/completion/uso_construccion/4").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["name"], "Habitacional");

    server
        .get("/price-m2/completion/uso_construccion/99")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_get_borough_not_found(pool: PgPool) {
    let response = server(pool).get("/price-m2/completion/alcaldia/42").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["status"], false);
}

#[sqlx::test]
async fn test_non_numeric_id_uses_error_envelope(pool: PgPool) {
    let server = server(pool);

    for url in [
        "/price-m2/completion/alcaldia/uno",
        "/price-m2/completion/uso_construccion/abc",
    ] {
        let response = server.get(url).await;

        response.assert_status_not_found();
        let json = response.json::<Value>();
        assert_eq!(json["status"], false);
        assert!(json["errors"][0].is_string());
    }
}

#[sqlx::test]
async fn test_schema_download_is_openapi(pool: PgPool) {
    let response = server(pool).get("/price-m2/doc/schema/download").await;

    response.assert_status_ok();
    let doc = response.json::<Value>();
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
}
