// src/handlers/events.rs

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
    models::event::{CreateEventPayload, Event, EventDetail, UpdateEventPayload},
};

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses((status = 200, description = "Eventos, os mais próximos primeiro", body = Vec<EventDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_events(State(app_state): State<AppState>) -> Result<Json<Vec<EventDetail>>, AppError> {
    Ok(Json(app_state.event_service.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    request_body = CreateEventPayload,
    responses(
        (status = 201, description = "Evento criado; organizador = usuário autenticado", body = Event),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateEventPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = app_state.event_service.create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "ID do evento")),
    request_body = UpdateEventPayload,
    responses(
        (status = 200, description = "Evento atualizado", body = Event),
        (status = 403, description = "Nem organizador nem admin"),
        (status = 404, description = "Evento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_event(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateEventPayload>,
) -> Result<Json<Event>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.event_service.update(&user, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "ID do evento")),
    responses(
        (status = 200, description = "Evento removido", body = MessageResponse),
        (status = 404, description = "Evento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_event(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.event_service.delete(&user, id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
