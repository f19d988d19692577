// src/models/event.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    #[schema(example = "Kerja Bakti")]
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    #[schema(example = "Balai RT 003")]
    pub location: String,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub organizer_name: Option<String>,
}

// organizerId nunca vem do cliente
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    #[validate(length(min = 1, message = "Event name is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required."))]
    pub description: String,
    pub event_date: DateTime<Utc>,
    #[validate(length(min = 1, message = "Location is required."))]
    pub location: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventPayload {
    #[validate(length(min = 1, message = "Event name cannot be empty."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty."))]
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "Location cannot be empty."))]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_supplied_organizer_is_ignored() {
        let payload: CreateEventPayload = serde_json::from_str(&format!(
            r#"{{"name":"Senam","description":"Senam pagi","eventDate":"2025-12-01T06:00:00Z",
                "location":"Lapangan","organizerId":"{}"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.name, "Senam");
    }
}
