//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use serde_json::{json, Value};
use unit_of_work::{http, InMemoryDatabase, RepositoryError, UnitOfWork};

use crate::support::{seeded, two_rows, TestRow};

/// Bind to port 0 and return the actual address.
async fn start_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn list_router(db: InMemoryDatabase) -> axum::Router {
    http::router::<_, TestRow, _>(move || Ok(UnitOfWork::new(db.connect())))
}

#[tokio::test]
async fn get_all_returns_json_array() {
    let base = start_server(list_router(seeded(&two_rows()))).await;

    let resp = reqwest::get(format!("{base}/getAll")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Vec<TestRow> = resp.json().await.unwrap();
    assert_eq!(body, two_rows());
}

#[tokio::test]
async fn get_all_on_empty_store() {
    let base = start_server(list_router(InMemoryDatabase::new())).await;

    let body: Value = reqwest::get(format!("{base}/getAll"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn each_request_sees_committed_data() {
    let db = InMemoryDatabase::new();
    let base = start_server(list_router(db.clone())).await;
    let client = reqwest::Client::new();

    let before: Vec<TestRow> = client
        .get(format!("{base}/getAll"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(before.is_empty());

    db.seed(&[TestRow::new(5, "late")]).unwrap();

    let after: Vec<TestRow> = client
        .get(format!("{base}/getAll"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after, vec![TestRow::new(5, "late")]);
}

#[tokio::test]
async fn connection_failure_maps_to_500() {
    let app = http::router::<unit_of_work::InMemoryStore, TestRow, _>(|| {
        Err(RepositoryError::InvalidArgument("store"))
    });
    let base = start_server(app).await;

    let resp = reqwest::get(format!("{base}/getAll")).await.unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "invalid argument: store is required" })
    );
}
