// src/handlers/dues.rs

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiPath, ApiQuery},
        upload::PAYMENT_PROOF_FIELDS,
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::{auth::AuthenticatedUser, rbac::{AdminOnly, RequireRole}, upload::read_multipart},
    models::dues::{
        BulkCreateDuesPayload, CreateDuesPayload, Dues, DuesDetail, DuesListQuery, UpdateDuesPayload,
    },
};

// Só para a documentação do multipart
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PaymentProofForm {
    #[schema(value_type = String, format = Binary)]
    payment_proof: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDuesResponse {
    pub message: String,
    pub created: usize,
    pub dues: Vec<Dues>,
}

#[utoipa::path(
    get,
    path = "/api/dues",
    tag = "Dues",
    params(("residentId" = Option<Uuid>, Query, description = "Filtro (só admin); morador sempre vê as próprias")),
    responses((status = 200, description = "Iurans, mais recentes primeiro", body = Vec<DuesDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_dues(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiQuery(query): ApiQuery<DuesListQuery>,
) -> Result<Json<Vec<DuesDetail>>, AppError> {
    Ok(Json(app_state.dues_service.list(&user, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/dues",
    tag = "Dues",
    request_body = CreateDuesPayload,
    responses(
        (status = 201, description = "Iuran criada", body = Dues),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Morador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_dues(
    State(app_state): State<AppState>,
    RequireRole(admin, _): AdminOnly,
    ApiJson(payload): ApiJson<CreateDuesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dues = app_state.dues_service.create(&admin, payload).await?;

    Ok((StatusCode::CREATED, Json(dues)))
}

#[utoipa::path(
    post,
    path = "/api/dues/bulk",
    tag = "Dues",
    request_body = BulkCreateDuesPayload,
    responses(
        (status = 201, description = "Uma iuran por morador", body = BulkDuesResponse),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_bulk_dues(
    State(app_state): State<AppState>,
    RequireRole(admin, _): AdminOnly,
    ApiJson(payload): ApiJson<BulkCreateDuesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let dues = app_state.dues_service.create_bulk(&admin, payload.terms).await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkDuesResponse {
            message: format!("Dues created for {} residents", dues.len()),
            created: dues.len(),
            dues,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/dues/{id}",
    tag = "Dues",
    params(("id" = Uuid, Path, description = "ID da iuran")),
    request_body = UpdateDuesPayload,
    responses(
        (status = 200, description = "Iuran atualizada", body = Dues),
        (status = 403, description = "Morador tentando Paid/Cancelled ou iuran de outro"),
        (status = 404, description = "Iuran não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_dues(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateDuesPayload>,
) -> Result<Json<Dues>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.dues_service.update(&user, id, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/dues/{id}/upload-proof",
    tag = "Dues",
    params(("id" = Uuid, Path, description = "ID da iuran")),
    request_body(content = PaymentProofForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Comprovante anexado; status PendingConfirmation", body = Dues),
        (status = 400, description = "Arquivo ausente, campo inesperado ou tipo não permitido"),
        (status = 413, description = "Arquivo maior que 5MB")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_proof(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Dues>, AppError> {
    let form = read_multipart(multipart?, PAYMENT_PROOF_FIELDS).await?;
    Ok(Json(app_state.dues_service.upload_proof(&user, id, form).await?))
}

#[utoipa::path(
    delete,
    path = "/api/dues/{id}",
    tag = "Dues",
    params(("id" = Uuid, Path, description = "ID da iuran")),
    responses(
        (status = 200, description = "Iuran removida", body = MessageResponse),
        (status = 404, description = "Iuran não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_dues(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.dues_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Dues deleted successfully")))
}
