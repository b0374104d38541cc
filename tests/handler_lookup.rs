mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use url_shortener::api::handlers::lookup_handler;
use url_shortener::domain::repositories::RecordStore;
use url_shortener::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/url/{code}", get(lookup_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_lookup_success() {
    let (state, store) = common::create_memory_state(&[]);
    common::create_test_record(
        store.as_ref(),
        "abc12345",
        "https://www.example.com/very/long/url",
        0,
    )
    .await;
    let server = server(state);

    let response = server.get("/url/abc12345").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["longUrl"], "https://www.example.com/very/long/url");
}

#[tokio::test]
async fn test_lookup_does_not_count_click() {
    let (state, store) = common::create_memory_state(&[]);
    common::create_test_record(store.as_ref(), "abc12345", "https://example.com", 3).await;
    let server = server(state);

    server.get("/url/abc12345").await.assert_status_ok();
    server.get("/url/abc12345").await.assert_status_ok();

    let record = store.get("abc12345").await.unwrap().unwrap();
    assert_eq!(record.clicks, 3);
}

#[tokio::test]
async fn test_lookup_not_found() {
    let (state, _store) = common::create_memory_state(&[]);
    let server = server(state);

    let response = server.get("/url/missing1").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Short code not found");
    assert_eq!(json["error"]["details"]["code"], "missing1");
}
