// src/handlers/system.rs

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::docs::ApiDoc;

// Mapa de rotas exibido no banner e no 404
pub const AVAILABLE_ROUTES: &[&str] = &[
    "POST /api/users/register",
    "POST /api/users/login",
    "GET|PUT /api/users/profile",
    "GET /api/users",
    "PUT|DELETE /api/users/:id",
    "GET|POST /api/announcements",
    "PUT|DELETE /api/announcements/:id",
    "GET|POST /api/complaints",
    "PUT|DELETE /api/complaints/:id",
    "GET|POST /api/dues",
    "POST /api/dues/bulk",
    "PUT|DELETE /api/dues/:id",
    "PUT /api/dues/:id/upload-proof",
    "GET|POST /api/events",
    "PUT|DELETE /api/events/:id",
    "GET|POST /api/businesses",
    "PUT|DELETE /api/businesses/:id",
    "GET|POST /api/letters",
    "GET /api/letters/admin",
    "GET|PUT|DELETE /api/letters/:id",
    "POST /api/uploads",
    "GET /api/admin/stats",
    "GET /api/admin/activity",
    "GET /uploads/:file",
    "GET /api-docs/openapi.json",
    "GET /health",
];

pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "name": "WargaConnect API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backend de gestão do RT/RW: avisos, reclamações, iurans, eventos, UMKM e cartas",
        "endpoints": {
            "users": "/api/users",
            "announcements": "/api/announcements",
            "complaints": "/api/complaints",
            "dues": "/api/dues",
            "events": "/api/events",
            "businesses": "/api/businesses",
            "letters": "/api/letters",
            "uploads": "/api/uploads",
            "admin": "/api/admin",
            "files": "/uploads",
            "docs": "/api-docs/openapi.json",
            "health": "/health",
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("Route {} not found", uri.path()),
            "availableRoutes": AVAILABLE_ROUTES,
        })),
    )
}
