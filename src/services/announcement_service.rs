// src/services/announcement_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AnnouncementRepository,
    middleware::rbac::ensure_owner_or_admin,
    models::{
        announcement::{
            Announcement, AnnouncementDetail, CreateAnnouncementPayload, UpdateAnnouncementPayload,
        },
        auth::CurrentUser,
    },
};

#[derive(Clone)]
pub struct AnnouncementService {
    repo: AnnouncementRepository,
}

impl AnnouncementService {
    pub fn new(repo: AnnouncementRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        author: &CurrentUser,
        payload: CreateAnnouncementPayload,
    ) -> Result<Announcement, AppError> {
        let announcement = self.repo.create(author.id, &payload.title, &payload.body).await?;
        tracing::info!("📢 Aviso criado: {}", announcement.id);
        Ok(announcement)
    }

    pub async fn list(&self) -> Result<Vec<AnnouncementDetail>, AppError> {
        self.repo.list(None).await
    }

    pub async fn update(
        &self,
        user: &CurrentUser,
        id: Uuid,
        payload: UpdateAnnouncementPayload,
    ) -> Result<Announcement, AppError> {
        let current = self.find(id).await?;
        ensure_owner_or_admin(user, current.author_id)?;

        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement"))
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let current = self.find(id).await?;
        ensure_owner_or_admin(user, current.author_id)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Announcement"));
        }
        tracing::info!("🗑️ Aviso removido: {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Announcement, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement"))
    }
}
