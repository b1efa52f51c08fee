//! Integration tests for the upload API
//!
//! Drives the full router (multipart extraction, pipeline, SQLite) with
//! `oneshot` requests against a database in a temporary folder.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use meter_common::db::{init_database, Account};
use meter_ingest::db::{accounts::insert_accounts, meter_readings::count_readings};
use meter_ingest::{build_router, AppState};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::util::ServiceExt;

const BOUNDARY: &str = "meter-ingest-test-boundary";

struct TestApp {
    app: axum::Router,
    pool: sqlx::SqlitePool,
    upload_folder: PathBuf,
    _temp_dir: TempDir,
}

async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("meter_readings.db"))
        .await
        .expect("Failed to create database");

    let accounts = [2344, 2233, 8766]
        .into_iter()
        .map(|account_id| Account {
            account_id,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        })
        .collect::<Vec<_>>();
    insert_accounts(&pool, &accounts).await.unwrap();

    let upload_folder = temp_dir.path().join("uploads");
    let state = AppState::new(pool.clone(), upload_folder.clone(), 1024 * 1024);

    TestApp {
        app: build_router(state),
        pool,
        upload_folder,
        _temp_dir: temp_dir,
    }
}

fn multipart_upload(field: &str, file_name: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/api/meter-reading-uploads")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn stored_file_count(folder: &Path) -> usize {
    std::fs::read_dir(folder).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_upload_reports_counts_and_persists_valid_rows() {
    let test = create_test_app().await;
    let csv = "AccountId,MeterReadingDateTime,MeterReadValue,\n\
               2344,22/04/2019 09:24,01002,\n\
               2233,22/04/2019 12:25,00323,\n\
               9999,22/04/2019 12:25,00323,\n\
               8766,22/04/2019 12:25,VOID,\n";

    let response = test
        .app
        .oneshot(multipart_upload("file", "readings.csv", csv))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["successCount"], 2);
    assert_eq!(json["failureCount"], 2);

    assert_eq!(count_readings(&test.pool).await.unwrap(), 2);
    assert_eq!(stored_file_count(&test.upload_folder), 0);
}

#[tokio::test]
async fn test_duplicate_readings_are_stored_once() {
    let test = create_test_app().await;
    let csv = "AccountId,MeterReadingDateTime,MeterReadValue\n\
               2344,22/04/2019 09:24,01002\n\
               2344,23/04/2019 09:24,01002\n";

    let response = test
        .app
        .oneshot(multipart_upload("file", "readings.csv", csv))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["successCount"], 1);
    assert_eq!(json["failureCount"], 1);
    assert_eq!(count_readings(&test.pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_non_csv_file_is_rejected() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(multipart_upload("file", "readings.txt", "AccountId\n2344\n"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "csv file required");
    assert_eq!(stored_file_count(&test.upload_folder), 0);
}

#[tokio::test]
async fn test_missing_file_part_is_rejected() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(multipart_upload("attachment", "readings.csv", "AccountId\n2344\n"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "csv file required");
}

#[tokio::test]
async fn test_non_multipart_request_is_rejected() {
    let test = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/meter-reading-uploads")
        .header("content-type", "text/csv")
        .body(Body::from("AccountId\n2344\n"))
        .unwrap();
    let response = test.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "csv file required");
}

#[tokio::test]
async fn test_header_only_file_fails_and_cleans_up() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(multipart_upload(
            "file",
            "readings.csv",
            "AccountId,MeterReadingDateTime,MeterReadValue",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.is_empty());
    assert_eq!(count_readings(&test.pool).await.unwrap(), 0);
    assert_eq!(stored_file_count(&test.upload_folder), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let test = create_test_app().await;

    let response = test
        .app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "meter-ingest");
}
