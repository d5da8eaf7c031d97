//! Requests that are rejected before touching the database.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, multipart_body, post_json, post_multipart, put_json, unreachable_pool,
    FAKE_PDF,
};
use serde_json::json;

#[tokio::test]
async fn test_create_job_description_rejects_blank_title() {
    let app = common::build_test_app(unreachable_pool());
    let response = post_json(
        app,
        "/api/v1/job-descriptions",
        json!({"title": "   ", "description": "Wij zoeken een Rust developer"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_job_description_rejects_missing_fields() {
    let app = common::build_test_app(unreachable_pool());
    let response = post_json(app, "/api/v1/job-descriptions", json!({"title": "Dev"})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_job_description_rejects_blank_description() {
    let app = common::build_test_app(unreachable_pool());
    let response = put_json(
        app,
        "/api/v1/job-descriptions/1",
        json!({"title": "Dev", "description": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_out_of_range_limit() {
    for uri in [
        "/api/v1/job-descriptions?limit=0",
        "/api/v1/job-descriptions?limit=101",
        "/api/v1/job-descriptions?offset=-1",
        "/api/v1/pdfs?limit=500",
    ] {
        let app = common::build_test_app(unreachable_pool());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/api/v1/job-descriptions/search?q=%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_non_pdf_file() {
    let app = common::build_test_app(unreachable_pool());
    let body = multipart_body(
        &[("name", "cv.docx"), ("job_id", "1")],
        Some(("cv.docx", b"PK\x03\x04not a pdf")),
    );
    let response = post_multipart(app, "/api/v1/pdfs", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_requires_job_id() {
    let app = common::build_test_app(unreachable_pool());
    let body = multipart_body(&[("name", "cv.pdf")], Some(("cv.pdf", FAKE_PDF)));
    let response = post_multipart(app, "/api/v1/pdfs", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_non_numeric_job_id() {
    let app = common::build_test_app(unreachable_pool());
    let body = multipart_body(
        &[("name", "cv.pdf"), ("job_id", "abc")],
        Some(("cv.pdf", FAKE_PDF)),
    );
    let response = post_multipart(app, "/api/v1/pdfs", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_bad_created_date() {
    let app = common::build_test_app(unreachable_pool());
    let body = multipart_body(
        &[("name", "cv.pdf"), ("job_id", "1"), ("created_date", "yesterday")],
        Some(("cv.pdf", FAKE_PDF)),
    );
    let response = post_multipart(app, "/api/v1/pdfs", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_text_rejects_blank_text() {
    let app = common::build_test_app(unreachable_pool());
    let response = post_json(app, "/api/v1/texts/1/text", json!({"text": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/api/v1/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_unavailable_database() {
    let app = common::build_test_app(unreachable_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["database"], "unavailable");
    assert_eq!(body["redis"], "unavailable");
    assert!(body["version"].is_string());
}
