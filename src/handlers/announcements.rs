// src/handlers/announcements.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiPath},
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::auth::AuthenticatedUser,
    models::announcement::{
        Announcement, AnnouncementDetail, CreateAnnouncementPayload, UpdateAnnouncementPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "Announcements",
    responses((status = 200, description = "Avisos, mais recentes primeiro", body = Vec<AnnouncementDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_announcements(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AnnouncementDetail>>, AppError> {
    Ok(Json(app_state.announcement_service.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = "Announcements",
    request_body = CreateAnnouncementPayload,
    responses(
        (status = 201, description = "Aviso criado", body = Announcement),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_announcement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateAnnouncementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let announcement = app_state.announcement_service.create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    tag = "Announcements",
    params(("id" = Uuid, Path, description = "ID do aviso")),
    request_body = UpdateAnnouncementPayload,
    responses(
        (status = 200, description = "Aviso atualizado", body = Announcement),
        (status = 403, description = "Nem autor nem admin"),
        (status = 404, description = "Aviso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_announcement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateAnnouncementPayload>,
) -> Result<Json<Announcement>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.announcement_service.update(&user, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    tag = "Announcements",
    params(("id" = Uuid, Path, description = "ID do aviso")),
    responses(
        (status = 200, description = "Aviso removido", body = MessageResponse),
        (status = 404, description = "Aviso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_announcement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.announcement_service.delete(&user, id).await?;
    Ok(Json(MessageResponse::new("Announcement deleted successfully")))
}
