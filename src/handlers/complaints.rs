// src/handlers/complaints.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::{auth::AuthenticatedUser, rbac::AdminOnly},
    models::complaint::{
        Complaint, ComplaintDetail, ComplaintListQuery, CreateComplaintPayload, UpdateComplaintPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = "Complaints",
    params(
        ("status" = Option<String>, Query, description = "Received, InProgress, Resolved ou Rejected"),
        ("reporterId" = Option<Uuid>, Query, description = "Filtra pelo autor")
    ),
    responses((status = 200, description = "Reclamações, mais recentes primeiro", body = Vec<ComplaintDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_complaints(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<ComplaintListQuery>,
) -> Result<Json<Vec<ComplaintDetail>>, AppError> {
    Ok(Json(app_state.complaint_service.list(query).await?))
}

#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = "Complaints",
    request_body = CreateComplaintPayload,
    responses(
        (status = 201, description = "Reclamação registrada", body = Complaint),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_complaint(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateComplaintPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let complaint = app_state.complaint_service.create(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(complaint)))
}

// Só o admin muda status/resposta; status fora do enum já para no ApiJson
#[utoipa::path(
    put,
    path = "/api/complaints/{id}",
    tag = "Complaints",
    params(("id" = Uuid, Path, description = "ID da reclamação")),
    request_body = UpdateComplaintPayload,
    responses(
        (status = 200, description = "Reclamação atualizada", body = Complaint),
        (status = 400, description = "Status inválido"),
        (status = 403, description = "Apenas admin"),
        (status = 404, description = "Reclamação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_complaint(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateComplaintPayload>,
) -> Result<Json<Complaint>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.complaint_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    tag = "Complaints",
    params(("id" = Uuid, Path, description = "ID da reclamação")),
    responses(
        (status = 200, description = "Reclamação removida", body = MessageResponse),
        (status = 404, description = "Reclamação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_complaint(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.complaint_service.delete(&user, id).await?;
    Ok(Json(MessageResponse::new("Complaint deleted successfully")))
}
