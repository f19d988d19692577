// src/handlers/letters.rs

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiPath},
        upload::LETTER_FIELDS,
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::{auth::AuthenticatedUser, rbac::AdminOnly, upload::read_multipart},
    models::letter::{LetterDetail, LetterRequest, LetterType, UpdateLetterPayload},
};

// Só para a documentação do multipart
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct LetterRequestForm {
    letter_type: LetterType,
    purpose: String,
    notes: Option<String>,
    // Um por arquivo de other-documents, na mesma ordem
    other_document_names: Option<Vec<String>>,
    #[serde(rename = "id-card")]
    #[schema(value_type = Option<String>, format = Binary)]
    id_card: Option<Vec<u8>>,
    #[serde(rename = "family-card")]
    #[schema(value_type = Option<String>, format = Binary)]
    family_card: Option<Vec<u8>>,
    #[serde(rename = "other-documents")]
    #[schema(value_type = Option<Vec<String>>, format = Binary)]
    other_documents: Option<Vec<Vec<u8>>>,
    #[schema(value_type = Option<Vec<String>>, format = Binary)]
    files: Option<Vec<Vec<u8>>>,
}

#[utoipa::path(
    get,
    path = "/api/letters",
    tag = "Letters",
    responses((status = 200, description = "Pedidos do próprio usuário", body = Vec<LetterDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_letters(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<LetterDetail>>, AppError> {
    Ok(Json(app_state.letter_service.list_own(&user).await?))
}

#[utoipa::path(
    get,
    path = "/api/letters/admin",
    tag = "Letters",
    responses(
        (status = 200, description = "Todos os pedidos", body = Vec<LetterDetail>),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_all_letters(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
) -> Result<Json<Vec<LetterDetail>>, AppError> {
    Ok(Json(app_state.letter_service.list_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/letters/{id}",
    tag = "Letters",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido", body = LetterDetail),
        (status = 403, description = "Nem solicitante nem admin"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_letter(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<LetterDetail>, AppError> {
    Ok(Json(app_state.letter_service.get(&user, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/letters",
    tag = "Letters",
    request_body(content = LetterRequestForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Pedido registrado", body = LetterRequest),
        (status = 400, description = "Campos ausentes, campo de arquivo inesperado ou tipo não permitido"),
        (status = 413, description = "Arquivo maior que 5MB")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_letter(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = read_multipart(multipart?, LETTER_FIELDS).await?;

    let letter = app_state.letter_service.create(&user, form).await?;

    Ok((StatusCode::CREATED, Json(letter)))
}

#[utoipa::path(
    put,
    path = "/api/letters/{id}",
    tag = "Letters",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateLetterPayload,
    responses(
        (status = 200, description = "Pedido atualizado", body = LetterRequest),
        (status = 400, description = "Status ausente ou inválido"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_letter(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateLetterPayload>,
) -> Result<Json<LetterRequest>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.letter_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/letters/{id}",
    tag = "Letters",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido removido", body = MessageResponse),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_letter(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.letter_service.delete(&user, id).await?;
    Ok(Json(MessageResponse::new("Letter request deleted successfully")))
}
