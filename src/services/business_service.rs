// src/services/business_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BusinessRepository, UserRepository},
    middleware::rbac::ensure_owner_or_admin,
    models::{
        auth::CurrentUser,
        business::{Business, BusinessDetail, CreateBusinessPayload, UpdateBusinessPayload},
    },
};

#[derive(Clone)]
pub struct BusinessService {
    repo: BusinessRepository,
    user_repo: UserRepository,
}

impl BusinessService {
    pub fn new(repo: BusinessRepository, user_repo: UserRepository) -> Self {
        Self { repo, user_repo }
    }

    // ownerId do corpo só vale para o admin; para os demais o dono é o chamador
    async fn resolve_owner(&self, user: &CurrentUser, requested: Option<Uuid>) -> Result<Uuid, AppError> {
        match requested {
            Some(owner_id) if user.role.is_admin() && owner_id != user.id => {
                if self.user_repo.find_by_id(owner_id).await?.is_none() {
                    return Err(AppError::not_found("Owner"));
                }
                Ok(owner_id)
            }
            _ => Ok(user.id),
        }
    }

    pub async fn create(&self, user: &CurrentUser, payload: CreateBusinessPayload) -> Result<Business, AppError> {
        let owner_id = self.resolve_owner(user, payload.owner_id).await?;
        let business = self.repo.create(owner_id, payload).await?;
        tracing::info!("🏪 UMKM criada: {}", business.id);
        Ok(business)
    }

    pub async fn list(&self) -> Result<Vec<BusinessDetail>, AppError> {
        self.repo.list_by_name().await
    }

    pub async fn update(&self, user: &CurrentUser, id: Uuid, payload: UpdateBusinessPayload) -> Result<Business, AppError> {
        let current = self.find(id).await?;
        ensure_owner_or_admin(user, current.owner_id)?;

        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("Business"))
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let current = self.find(id).await?;
        ensure_owner_or_admin(user, current.owner_id)?;

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Business"));
        }
        tracing::info!("🗑️ UMKM removida: {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Business, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| AppError::not_found("Business"))
    }
}
