// src/services/event_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EventRepository,
    middleware::rbac::ensure_owner_or_admin,
    models::{
        auth::CurrentUser,
        event::{CreateEventPayload, Event, EventDetail, UpdateEventPayload},
    },
};

#[derive(Clone)]
pub struct EventService {
    repo: EventRepository,
}

impl EventService {
    pub fn new(repo: EventRepository) -> Self {
        Self { repo }
    }

    // O responsável é sempre quem está autenticado
    pub async fn create(&self, organizer: &CurrentUser, payload: CreateEventPayload) -> Result<Event, AppError> {
        let event = self.repo.create(organizer.id, payload).await?;
        tracing::info!("📅 Evento criado: {}", event.id);
        Ok(event)
    }

    pub async fn list(&self) -> Result<Vec<EventDetail>, AppError> {
        self.repo.list_by_event_date().await
    }

    pub async fn update(&self, user: &CurrentUser, id: Uuid, payload: UpdateEventPayload) -> Result<Event, AppError> {
        let current = self.find(id).await?;
        ensure_owner_or_admin(user, current.organizer_id)?;

        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("Event"))
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let current = self.find(id).await?;
        ensure_owner_or_admin(user, current.organizer_id)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Event"));
        }
        tracing::info!("🗑️ Evento removido: {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Event, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| AppError::not_found("Event"))
    }
}
