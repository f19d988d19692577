// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{CurrentUser, UserRole},
};

/// Quais papéis passam por um portão.
pub trait RoleRequirement: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;
    fn description() -> &'static str;
}

pub struct ChairRole;

impl RoleRequirement for ChairRole {
    fn allows(role: UserRole) -> bool {
        role.is_admin()
    }

    fn description() -> &'static str {
        "Admin access required"
    }
}

/// Sem identidade resolvida → 401; identidade com papel errado → 403.
pub fn require_role<T: RoleRequirement>(user: Option<&CurrentUser>) -> Result<&CurrentUser, AppError> {
    let user = user.ok_or_else(|| AppError::Unauthenticated("Authentication required".to_string()))?;
    if !T::allows(user.role) {
        return Err(AppError::Forbidden(T::description().to_string()));
    }
    Ok(user)
}

pub fn require_admin(user: Option<&CurrentUser>) -> Result<&CurrentUser, AppError> {
    require_role::<ChairRole>(user)
}

pub fn ensure_owner_or_admin(user: &CurrentUser, owner_id: Uuid) -> Result<(), AppError> {
    if user.id == owner_id || user.role.is_admin() {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "You are not allowed to modify this resource".to_string(),
    ))
}

/// O extrator (guardião). Precisa rodar depois do auth_guard.
pub struct RequireRole<T>(pub CurrentUser, pub PhantomData<T>);

pub type AdminOnly = RequireRole<ChairRole>;

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = require_role::<T>(parts.extensions.get::<CurrentUser>())?;
        Ok(RequireRole(user.clone(), PhantomData))
    }
}

// Mesmo portão como camada, para grupos de rotas inteiros (/api/admin)
pub async fn admin_guard(request: Request, next: Next) -> Result<Response, AppError> {
    require_admin(request.extensions().get::<CurrentUser>())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "warga@example.com".into(),
            role,
            full_name: "Warga".into(),
        }
    }

    #[test]
    fn admin_gate_without_identity_is_unauthenticated() {
        assert!(matches!(require_admin(None), Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn admin_gate_rejects_non_chair_roles() {
        for role in [UserRole::Resident, UserRole::Treasurer, UserRole::Security] {
            let u = user(role);
            assert!(matches!(require_admin(Some(&u)), Err(AppError::Forbidden(_))));
        }
        let chair = user(UserRole::Chair);
        assert_eq!(require_admin(Some(&chair)).unwrap().id, chair.id);
    }

    #[test]
    fn owner_or_admin() {
        let owner = user(UserRole::Resident);
        let other = user(UserRole::Resident);
        let chair = user(UserRole::Chair);

        assert!(ensure_owner_or_admin(&owner, owner.id).is_ok());
        assert!(ensure_owner_or_admin(&chair, owner.id).is_ok());
        assert!(matches!(ensure_owner_or_admin(&other, owner.id), Err(AppError::Forbidden(_))));
    }
}
