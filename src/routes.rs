// src/routes.rs

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    common::upload::{
        multipart_body_limit, BATCH_FIELDS, LETTER_FIELDS, PAYMENT_PROOF_FIELDS, UPLOAD_URL_PREFIX,
    },
    config::AppState,
    handlers,
    middleware::{auth::auth_guard, rbac::admin_guard},
};

// Último recurso: pânico num handler vira 500 no mesmo formato JSON
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Pânico no handler: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "An unexpected error occurred." })),
    )
        .into_response()
}

pub fn build_router(app_state: AppState) -> Router {
    let auth_layer = || axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    // --- Usuários: registro/login públicos, o resto autenticado ---
    let user_public_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/profile",
            get(handlers::auth::get_profile).put(handlers::auth::update_profile),
        )
        .route("/", get(handlers::auth::list_users))
        .route(
            "/{id}",
            put(handlers::auth::update_user).delete(handlers::auth::delete_user),
        )
        .route_layer(auth_layer());

    let announcement_routes = Router::new()
        .route(
            "/",
            get(handlers::announcements::list_announcements)
                .post(handlers::announcements::create_announcement),
        )
        .route(
            "/{id}",
            put(handlers::announcements::update_announcement)
                .delete(handlers::announcements::delete_announcement),
        )
        .route_layer(auth_layer());

    let complaint_routes = Router::new()
        .route(
            "/",
            get(handlers::complaints::list_complaints).post(handlers::complaints::create_complaint),
        )
        .route(
            "/{id}",
            put(handlers::complaints::update_complaint).delete(handlers::complaints::delete_complaint),
        )
        .route_layer(auth_layer());

    let dues_routes = Router::new()
        .route(
            "/",
            get(handlers::dues::list_dues).post(handlers::dues::create_dues),
        )
        .route("/bulk", post(handlers::dues::create_bulk_dues))
        .route(
            "/{id}",
            put(handlers::dues::update_dues).delete(handlers::dues::delete_dues),
        )
        .route(
            "/{id}/upload-proof",
            put(handlers::dues::upload_proof)
                .layer(DefaultBodyLimit::max(multipart_body_limit(PAYMENT_PROOF_FIELDS))),
        )
        .route_layer(auth_layer());

    let event_routes = Router::new()
        .route(
            "/",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/{id}",
            put(handlers::events::update_event).delete(handlers::events::delete_event),
        )
        .route_layer(auth_layer());

    let business_routes = Router::new()
        .route(
            "/",
            get(handlers::businesses::list_businesses).post(handlers::businesses::create_business),
        )
        .route(
            "/{id}",
            put(handlers::businesses::update_business).delete(handlers::businesses::delete_business),
        )
        .route_layer(auth_layer());

    let letter_routes = Router::new()
        .route(
            "/",
            get(handlers::letters::list_my_letters)
                .post(handlers::letters::create_letter)
                .layer(DefaultBodyLimit::max(multipart_body_limit(LETTER_FIELDS))),
        )
        .route("/admin", get(handlers::letters::list_all_letters))
        .route(
            "/{id}",
            get(handlers::letters::get_letter)
                .put(handlers::letters::update_letter)
                .delete(handlers::letters::delete_letter),
        )
        .route_layer(auth_layer());

    let upload_routes = Router::new()
        .route(
            "/",
            post(handlers::uploads::upload_files)
                .layer(DefaultBodyLimit::max(multipart_body_limit(BATCH_FIELDS))),
        )
        .route_layer(auth_layer());

    // admin_guard roda depois do auth_guard (a última camada é a mais externa)
    let admin_routes = Router::new()
        .route("/stats", get(handlers::dashboard::get_stats))
        .route("/activity", get(handlers::dashboard::get_activity))
        .route_layer(axum_middleware::from_fn(admin_guard))
        .route_layer(auth_layer());

    let uploads_dir = ServeDir::new(app_state.config.upload_dir.clone());

    Router::new()
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .route("/api-docs/openapi.json", get(handlers::system::openapi_json))
        .nest("/api/users", user_public_routes.merge(user_routes))
        .nest("/api/announcements", announcement_routes)
        .nest("/api/complaints", complaint_routes)
        .nest("/api/dues", dues_routes)
        .nest("/api/events", event_routes)
        .nest("/api/businesses", business_routes)
        .nest("/api/letters", letter_routes)
        .nest("/api/uploads", upload_routes)
        .nest("/api/admin", admin_routes)
        .nest_service(UPLOAD_URL_PREFIX, uploads_dir)
        .fallback(handlers::system::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
