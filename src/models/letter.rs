// src/models/letter.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, upload::validate_upload_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "letter_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterType {
    #[serde(rename = "ID-card")]
    IdCard,
    FamilyCard,
    PoliceClearance,
    Domicile,
    Birth,
    Death,
    Marriage,
    Other,
}

impl std::str::FromStr for LetterType {
    type Err = AppError;

    // Campo texto do multipart: mesmo vocabulário do JSON
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
            .map_err(|_| AppError::BadRequest(format!("Invalid letter type '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "letter_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterStatus {
    Submitted,
    InProgress,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherDocument {
    pub document_name: String,
    pub file_url: String,
}

// Sempre montado a partir dos uploads validados, nunca do corpo da requisição
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_card_url: Option<String>,
    #[serde(default)]
    pub other_documents: Vec<OtherDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetterRequest {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub letter_type: LetterType,
    #[schema(example = "Melamar pekerjaan")]
    pub purpose: String,
    pub notes: Option<String>,
    pub status: LetterStatus,
    pub admin_response: Option<String>,
    pub generated_file_url: Option<String>,
    #[schema(value_type = Attachments)]
    pub attachments: Json<Attachments>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetterDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub letter: LetterRequest,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
}

/// Dados já extraídos do multipart e com os arquivos gravados.
#[derive(Debug, Clone)]
pub struct NewLetterRequest {
    pub letter_type: LetterType,
    pub purpose: String,
    pub notes: Option<String>,
    pub attachments: Attachments,
}

// Só o admin atualiza; status é obrigatório
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLetterPayload {
    pub status: LetterStatus,
    pub admin_response: Option<String>,
    #[validate(custom(function = "validate_upload_url"))]
    pub generated_file_url: Option<String>,
}
