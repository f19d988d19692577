use serde::Serialize;
use utoipa::ToSchema;

pub mod announcements;
pub mod auth;
pub mod businesses;
pub mod complaints;
pub mod dashboard;
pub mod dues;
pub mod events;
pub mod letters;
pub mod system;
pub mod uploads;

// Resposta das remoções (não devolvemos o registro apagado)
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
