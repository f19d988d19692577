// src/models/complaint.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::upload::validate_upload_url;

pub const DEFAULT_COMPLAINT_CATEGORY: &str = "Other";

// Qualquer status pode ir para qualquer outro; só o conjunto é validado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Received,
    InProgress,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    pub reporter_id: Uuid,
    #[schema(example = "Lampu jalan mati")]
    pub title: String,
    #[schema(example = "Lampu di depan blok C sudah mati sejak seminggu.")]
    pub body: String,
    #[schema(example = "/uploads/files-1700000000000-123456789.jpg")]
    pub photo_url: Option<String>,
    #[schema(example = "Infrastructure")]
    pub category: String,
    pub location: Option<String>,
    pub admin_response: Option<String>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub complaint: Complaint,
    pub reporter_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintPayload {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required."))]
    pub body: String,
    #[validate(custom(function = "validate_upload_url"))]
    pub photo_url: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

// Só o admin usa: status e resposta
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintPayload {
    pub status: Option<ComplaintStatus>,
    pub admin_response: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintListQuery {
    pub status: Option<ComplaintStatus>,
    pub reporter_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_must_be_a_known_value() {
        let ok: UpdateComplaintPayload = serde_json::from_str(r#"{"status":"Resolved"}"#).unwrap();
        assert_eq!(ok.status, Some(ComplaintStatus::Resolved));

        assert!(serde_json::from_str::<UpdateComplaintPayload>(r#"{"status":"Bogus"}"#).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let p: UpdateComplaintPayload =
            serde_json::from_str(r#"{"adminResponse":"ok","title":"hijack","reporterId":"x"}"#).unwrap();
        assert_eq!(p.admin_response.as_deref(), Some("ok"));
        assert!(p.status.is_none());
    }

    #[test]
    fn photo_url_must_point_to_an_upload() {
        let mut payload = CreateComplaintPayload {
            title: "Lampu".into(),
            body: "Mati".into(),
            photo_url: Some("http://evil.example/x.jpg".into()),
            category: None,
            location: None,
        };
        assert!(payload.validate().is_err());

        payload.photo_url = Some("/uploads/files-1-000000001.jpg".into());
        assert!(payload.validate().is_ok());
    }
}
