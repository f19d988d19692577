// src/models/business.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::upload::validate_upload_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "business_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessCategory {
    Food,
    Beverage,
    Service,
    Craft,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Warung Bu Sri")]
    pub business_name: String,
    pub description: String,
    pub category: BusinessCategory,
    pub photo_url: Option<String>,
    #[schema(example = "081298765432")]
    pub phone: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub business: Business,
    pub owner_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessPayload {
    #[validate(length(min = 1, message = "Business name is required."))]
    pub business_name: String,
    #[validate(length(min = 1, message = "Description is required."))]
    pub description: String,
    pub category: BusinessCategory,
    #[validate(custom(function = "validate_upload_url"))]
    pub photo_url: Option<String>,
    #[validate(length(min = 1, message = "Business phone is required."))]
    pub phone: String,
    pub location: Option<String>,
    // Só o admin pode cadastrar em nome de outro morador
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessPayload {
    #[validate(length(min = 1, message = "Business name cannot be empty."))]
    pub business_name: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty."))]
    pub description: Option<String>,
    pub category: Option<BusinessCategory>,
    #[validate(custom(function = "validate_upload_url"))]
    pub photo_url: Option<String>,
    #[validate(length(min = 1, message = "Business phone cannot be empty."))]
    pub phone: Option<String>,
    pub location: Option<String>,
}
