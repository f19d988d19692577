// src/handlers/businesses.rs

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
    models::business::{Business, BusinessDetail, CreateBusinessPayload, UpdateBusinessPayload},
};

#[utoipa::path(
    get,
    path = "/api/businesses",
    tag = "Businesses",
    responses((status = 200, description = "UMKM em ordem alfabética", body = Vec<BusinessDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_businesses(State(app_state): State<AppState>) -> Result<Json<Vec<BusinessDetail>>, AppError> {
    Ok(Json(app_state.business_service.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/businesses",
    tag = "Businesses",
    request_body = CreateBusinessPayload,
    responses(
        (status = 201, description = "UMKM cadastrada", body = Business),
        (status = 400, description = "Dados inválidos ou nome já cadastrado"),
        (status = 404, description = "Dono informado não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_business(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateBusinessPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let business = app_state.business_service.create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(business)))
}

#[utoipa::path(
    put,
    path = "/api/businesses/{id}",
    tag = "Businesses",
    params(("id" = Uuid, Path, description = "ID da UMKM")),
    request_body = UpdateBusinessPayload,
    responses(
        (status = 200, description = "UMKM atualizada", body = Business),
        (status = 403, description = "Nem dono nem admin"),
        (status = 404, description = "UMKM não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_business(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateBusinessPayload>,
) -> Result<Json<Business>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.business_service.update(&user, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/businesses/{id}",
    tag = "Businesses",
    params(("id" = Uuid, Path, description = "ID da UMKM")),
    responses(
        (status = 200, description = "UMKM removida", body = MessageResponse),
        (status = 404, description = "UMKM não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_business(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.business_service.delete(&user, id).await?;
    Ok(Json(MessageResponse::new("Business deleted successfully")))
}
