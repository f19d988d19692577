// src/common/error.rs

use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::upload::MAX_FILE_SIZE_MB;

// Definido uma vez no startup (APP_ENV). Em produção o detalhe do erro 500 não vai para o cliente.
static EXPOSE_ERROR_DETAILS: OnceLock<bool> = OnceLock::new();

pub fn set_expose_error_details(expose: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(expose);
}

fn expose_error_details() -> bool {
    EXPOSE_ERROR_DETAILS.get().copied().unwrap_or(false)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Email already registered")]
    EmailAlreadyExists,

    // Violação de UNIQUE já traduzida para mensagem de domínio
    #[error("{0}")]
    UniqueConstraintViolation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Invalid or missing authentication token")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("File too large (max {}MB)", MAX_FILE_SIZE_MB)]
    PayloadTooLarge,

    #[error("Unsupported file type '{0}'. Only JPG, PNG or PDF files are allowed")]
    UnsupportedFileType(String),

    #[error("Unexpected file field '{0}'")]
    UnexpectedField(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::EmailAlreadyExists
            | AppError::UniqueConstraintViolation(_)
            | AppError::InvalidCredentials
            | AppError::UnsupportedFileType(_)
            | AppError::UnexpectedField(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DatabaseError(_)
            | AppError::StorageError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "message": "One or more fields are invalid.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        if status.is_server_error() {
            tracing::error!("Internal server error: {}", self);
            let mut body = json!({
                "success": false,
                "message": "An unexpected error occurred.",
            });
            if expose_error_details() {
                body["error"] = json!(self.to_string());
            }
            return (status, Json(body)).into_response();
        }

        let body = Json(json!({ "success": false, "message": self.to_string() }));
        (status, body).into_response()
    }
}

// Traduz a violação de UNIQUE (pelo nome da constraint) para o erro de domínio
pub fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_email_key") => AppError::EmailAlreadyExists,
                Some("users_national_id_key") => AppError::UniqueConstraintViolation(
                    "National ID already registered".to_string(),
                ),
                Some("users_phone_key") => AppError::UniqueConstraintViolation(
                    "Phone number already registered".to_string(),
                ),
                Some("businesses_business_name_key") => AppError::UniqueConstraintViolation(
                    "Business name already registered".to_string(),
                ),
                Some(other) => AppError::UniqueConstraintViolation(format!(
                    "Duplicate value violates '{}'",
                    other
                )),
                None => AppError::UniqueConstraintViolation("Duplicate value".to_string()),
            };
        }
    }
    e.into()
}
