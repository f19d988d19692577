// src/handlers/uploads.rs

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, upload::BATCH_FIELDS},
    config::AppState,
    middleware::upload::read_multipart,
    services::upload_service::StoredFile,
};

// Só para a documentação do multipart
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct BatchUploadForm {
    #[schema(value_type = Vec<String>, format = Binary)]
    files: Vec<Vec<u8>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<StoredFile>,
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "Uploads",
    request_body(content = BatchUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Arquivos gravados; use as URLs em photoUrl", body = UploadResponse),
        (status = 400, description = "Nenhum arquivo, campo inesperado ou tipo não permitido"),
        (status = 413, description = "Arquivo maior que 5MB")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_files(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = read_multipart(multipart?, BATCH_FIELDS).await?;

    let files = app_state.upload_store.store_batch(&form).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: format!("{} file(s) uploaded", files.len()),
            files,
        }),
    ))
}
