// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AdminUpdateUserPayload, UpdateProfilePayload, User, UserRole},
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<User, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| AppError::not_found("User"))
    }

    // O próprio usuário: só nome, endereço, telefone e membros da família
    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfilePayload) -> Result<User, AppError> {
        self.repo
            .update(id, payload.into())
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, AppError> {
        self.repo.list(role).await
    }

    pub async fn admin_update(&self, id: Uuid, payload: AdminUpdateUserPayload) -> Result<User, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("User"));
        }
        tracing::info!("🗑️ Usuário removido: {}", id);
        Ok(())
    }
}
