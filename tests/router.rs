// tests/router.rs
//
// Rotas que respondem sem tocar no banco: pool preguiçoso apontando para lugar nenhum.

mod common;

use axum::http::StatusCode;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;
use wargaconnect::models::auth::{Claims, UserRole};

use common::{get_request, json_request, lazy_app, send};

#[tokio::test]
async fn root_lists_the_api_surface() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let (status, body) = send(&app, get_request("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["endpoints"]["dues"], "/api/dues");
    assert_eq!(body["endpoints"]["docs"], "/api-docs/openapi.json");
}

#[tokio::test]
async fn health_does_not_need_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let (status, body) = send(&app, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let (status, body) = send(&app, get_request("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/dues/bulk"].is_object());
    assert!(body["components"]["securitySchemes"]["api_jwt"].is_object());
}

#[tokio::test]
async fn unknown_routes_get_json_404_with_route_map() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let (status, body) = send(&app, get_request("/api/nothing-here", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route /api/nothing-here not found");
    let routes = body["availableRoutes"].as_array().unwrap();
    assert!(routes.iter().any(|r| r == "POST /api/users/login"));
}

#[tokio::test]
async fn protected_routes_reject_missing_or_invalid_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    for uri in ["/api/announcements", "/api/dues", "/api/letters/admin", "/api/admin/stats", "/api/users/profile"] {
        let (status, body) = send(&app, get_request(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, get_request(uri, Some("not.a.jwt"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4(),
        role: UserRole::Chair,
        iat: now,
        exp: now + 3600,
    };
    let forged = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"other-secret")).unwrap();

    let (status, _) = send(&app, get_request("/api/admin/stats", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_register_body_is_a_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/users/register")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_validation_runs_before_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let payload = json!({
        "nationalId": "3201010101010001",
        "familyCardId": "3201010101010000",
        "fullName": "Budi Santoso",
        "email": "not-an-email",
        "password": "123",
        "rtCode": "003",
        "rwCode": "007"
    });
    let (status, body) = send(&app, json_request("POST", "/api/users/register", None, &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn stored_uploads_are_served_statically() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("files-1-000000001.pdf"), b"%PDF-1.4").unwrap();
    let app = lazy_app(dir.path().to_path_buf());

    let response = tower::ServiceExt::oneshot(app, get_request("/uploads/files-1-000000001.pdf", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
