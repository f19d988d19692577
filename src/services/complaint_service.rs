// src/services/complaint_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ComplaintRepository,
    middleware::rbac::ensure_owner_or_admin,
    models::{
        auth::CurrentUser,
        complaint::{
            Complaint, ComplaintDetail, ComplaintListQuery, CreateComplaintPayload,
            UpdateComplaintPayload,
        },
    },
};

#[derive(Clone)]
pub struct ComplaintService {
    repo: ComplaintRepository,
}

impl ComplaintService {
    pub fn new(repo: ComplaintRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        reporter: &CurrentUser,
        payload: CreateComplaintPayload,
    ) -> Result<Complaint, AppError> {
        let complaint = self.repo.create(reporter.id, payload).await?;
        tracing::info!("📝 Reclamação criada: {}", complaint.id);
        Ok(complaint)
    }

    pub async fn list(&self, query: ComplaintListQuery) -> Result<Vec<ComplaintDetail>, AppError> {
        self.repo.list(query.status, query.reporter_id, None).await
    }

    // Só admin chega aqui (extrator AdminOnly no handler)
    pub async fn update(&self, id: Uuid, payload: UpdateComplaintPayload) -> Result<Complaint, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("Complaint"))
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Complaint"))?;
        ensure_owner_or_admin(user, current.reporter_id)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Complaint"));
        }
        tracing::info!("🗑️ Reclamação removida: {}", id);
        Ok(())
    }
}
