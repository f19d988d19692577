// src/models/dues.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::upload::validate_upload_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    PendingConfirmation,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    // Paid/Cancelled só por transição do admin
    pub fn is_admin_only(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Cancelled)
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Amount cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dues {
    pub id: Uuid,
    pub resident_id: Uuid,
    pub creator_id: Uuid,

    #[schema(example = "Iuran Keamanan November")]
    pub title: String,

    #[serde(rename = "type")]
    #[schema(example = "Iuran RT")]
    pub dues_type: Option<String>,

    #[schema(example = "Keamanan")]
    pub category: String,

    #[schema(example = "50000")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-11-30")]
    pub due_date: NaiveDate,

    #[schema(example = 11)]
    pub period_month: i16,

    #[schema(example = 2025)]
    pub period_year: i32,

    pub payment_status: PaymentStatus,
    pub payment_proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuesDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub dues: Dues,
    pub resident_name: Option<String>,
    pub creator_name: Option<String>,
}

// Campos comuns de uma cobrança (usado no individual e no em massa)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuesTerms {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,

    #[serde(rename = "type")]
    pub dues_type: Option<String>,

    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "50000")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-11-30")]
    pub due_date: NaiveDate,

    #[validate(range(min = 1, max = 12, message = "Period month must be between 1 and 12."))]
    pub period_month: i16,

    #[validate(range(min = 2000, max = 2100, message = "Period year is out of range."))]
    pub period_year: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDuesPayload {
    pub resident_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub terms: DuesTerms,
}

// Uma cobrança por morador (role = resident) na mesma execução
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateDuesPayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub terms: DuesTerms,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDuesPayload {
    #[validate(length(min = 1, message = "Title cannot be empty."))]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub dues_type: Option<String>,

    #[validate(length(min = 1, message = "Category cannot be empty."))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Option<Decimal>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 12, message = "Period month must be between 1 and 12."))]
    pub period_month: Option<i16>,

    #[validate(range(min = 2000, max = 2100, message = "Period year is out of range."))]
    pub period_year: Option<i32>,

    pub payment_status: Option<PaymentStatus>,

    #[validate(custom(function = "validate_upload_url"))]
    pub payment_proof_url: Option<String>,
}

impl UpdateDuesPayload {
    /// O que o próprio morador pode aplicar: status (sem Paid/Cancelled) e comprovante.
    /// O resto é ignorado em silêncio.
    pub fn resident_subset(self) -> Self {
        Self {
            payment_status: self.payment_status,
            payment_proof_url: self.payment_proof_url,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesListQuery {
    pub resident_id: Option<Uuid>,
}
