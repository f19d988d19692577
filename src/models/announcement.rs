// src/models/announcement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub author_id: Uuid,
    #[schema(example = "Kerja bakti hari Minggu")]
    pub title: String,
    #[schema(example = "Seluruh warga diharapkan hadir pukul 07.00 di balai RT.")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// Pengumuman + dados do autor (o "populate")
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub announcement: Announcement,
    pub author_name: Option<String>,
    pub author_role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementPayload {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required."))]
    pub body: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnouncementPayload {
    #[validate(length(min = 1, message = "Title cannot be empty."))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Body cannot be empty."))]
    pub body: Option<String>,
}
