// src/services/dues_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DuesRepository, UserRepository},
    middleware::upload::MultipartForm,
    models::{
        auth::CurrentUser,
        dues::{CreateDuesPayload, Dues, DuesDetail, DuesListQuery, DuesTerms, PaymentStatus, UpdateDuesPayload},
    },
    services::upload_service::UploadStore,
};

/// Decide o que cada papel pode aplicar numa cobrança.
/// Admin: tudo. Morador dono: só status (sem Paid/Cancelled) e comprovante,
/// e nada depois que o admin fechou a cobrança. Outros: 403.
pub fn authorize_dues_update(
    user: &CurrentUser,
    current: &Dues,
    payload: UpdateDuesPayload,
) -> Result<UpdateDuesPayload, AppError> {
    if user.role.is_admin() {
        return Ok(payload);
    }
    ensure_resident_may_change(user, current.resident_id, current.payment_status)?;
    if payload.payment_status.is_some_and(|s| s.is_admin_only()) {
        return Err(AppError::Forbidden(
            "Only an admin can mark dues as Paid or Cancelled".to_string(),
        ));
    }
    Ok(payload.resident_subset())
}

// Dono da cobrança, e ela ainda não foi decidida (Paid/Cancelled) pelo admin
fn ensure_resident_may_change(user: &CurrentUser, resident_id: Uuid, status: PaymentStatus) -> Result<(), AppError> {
    if user.id != resident_id {
        return Err(AppError::Forbidden(
            "You are not allowed to modify this dues record".to_string(),
        ));
    }
    if status.is_admin_only() {
        return Err(AppError::Forbidden(
            "This dues record was already closed by an admin".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct DuesService {
    repo: DuesRepository,
    user_repo: UserRepository,
    uploads: UploadStore,
    pool: PgPool,
}

impl DuesService {
    pub fn new(repo: DuesRepository, user_repo: UserRepository, uploads: UploadStore, pool: PgPool) -> Self {
        Self {
            repo,
            user_repo,
            uploads,
            pool,
        }
    }

    // Morador vê só as próprias cobranças; o filtro residentId vale só para o admin
    pub async fn list(&self, user: &CurrentUser, query: DuesListQuery) -> Result<Vec<DuesDetail>, AppError> {
        let resident_filter = if user.role.is_admin() {
            query.resident_id
        } else {
            Some(user.id)
        };
        self.repo.list(resident_filter, None).await
    }

    pub async fn create(&self, creator: &CurrentUser, payload: CreateDuesPayload) -> Result<Dues, AppError> {
        if self.user_repo.find_by_id(payload.resident_id).await?.is_none() {
            return Err(AppError::not_found("Resident"));
        }
        let dues = self.repo.create(payload.resident_id, creator.id, &payload.terms).await?;
        tracing::info!("💰 Iuran criada: {} para {}", dues.id, dues.resident_id);
        Ok(dues)
    }

    pub async fn create_bulk(&self, creator: &CurrentUser, terms: DuesTerms) -> Result<Vec<Dues>, AppError> {
        let mut tx = self.pool.begin().await?;
        let created = self.repo.create_for_all_residents(&mut *tx, creator.id, &terms).await?;
        tx.commit().await?;

        tracing::info!("💰 Cobrança em massa: {} iurans criadas", created.len());
        Ok(created)
    }

    pub async fn update(&self, user: &CurrentUser, id: Uuid, payload: UpdateDuesPayload) -> Result<Dues, AppError> {
        let current = self.find(id).await?;
        let allowed = authorize_dues_update(user, &current, payload)?;

        self.repo
            .update(id, allowed)
            .await?
            .ok_or_else(|| AppError::not_found("Dues"))
    }

    // Comprovante: checa dono antes de gravar; se o UPDATE falhar, o arquivo é apagado
    pub async fn upload_proof(&self, user: &CurrentUser, id: Uuid, form: MultipartForm) -> Result<Dues, AppError> {
        let current = self.find(id).await?;
        if !user.role.is_admin() {
            ensure_resident_may_change(user, current.resident_id, current.payment_status)?;
        }

        let proof = form
            .files
            .first()
            .ok_or_else(|| AppError::BadRequest("Payment proof file is required".to_string()))?;

        let stored = self.uploads.persist(proof).await?;
        match self.repo.attach_proof(id, &stored.url).await {
            Ok(Some(dues)) => Ok(dues),
            Ok(None) => {
                self.uploads.discard(std::slice::from_ref(&stored)).await;
                Err(AppError::not_found("Dues"))
            }
            Err(e) => {
                self.uploads.discard(std::slice::from_ref(&stored)).await;
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Dues"));
        }
        tracing::info!("🗑️ Iuran removida: {}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Dues, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| AppError::not_found("Dues"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "x@example.com".into(),
            role,
            full_name: "X".into(),
        }
    }

    fn dues_of(resident_id: Uuid, status: PaymentStatus) -> Dues {
        Dues {
            id: Uuid::new_v4(),
            resident_id,
            creator_id: Uuid::new_v4(),
            title: "Iuran kebersihan".into(),
            dues_type: None,
            category: "monthly".into(),
            amount: Decimal::new(25_000, 0),
            due_date: NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
            period_month: 1,
            period_year: 2030,
            payment_status: status,
            payment_proof_url: None,
            created_at: Utc::now(),
        }
    }

    fn payload(status: Option<PaymentStatus>) -> UpdateDuesPayload {
        UpdateDuesPayload {
            amount: Some(Decimal::ONE),
            payment_status: status,
            ..Default::default()
        }
    }

    #[test]
    fn admin_may_set_anything() {
        let chair = user(UserRole::Chair);
        let out = authorize_dues_update(&chair, &dues_of(Uuid::new_v4(), PaymentStatus::Unpaid), payload(Some(PaymentStatus::Paid))).unwrap();
        assert_eq!(out.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(out.amount, Some(Decimal::ONE));
    }

    #[test]
    fn owner_is_limited_to_status_and_proof() {
        let owner = user(UserRole::Resident);
        let out = authorize_dues_update(&owner, &dues_of(owner.id, PaymentStatus::Unpaid), payload(Some(PaymentStatus::PendingConfirmation))).unwrap();
        assert_eq!(out.payment_status, Some(PaymentStatus::PendingConfirmation));
        assert!(out.amount.is_none());
    }

    #[test]
    fn owner_cannot_mark_paid_or_cancelled() {
        let owner = user(UserRole::Resident);
        for status in [PaymentStatus::Paid, PaymentStatus::Cancelled] {
            let err = authorize_dues_update(&owner, &dues_of(owner.id, PaymentStatus::Unpaid), payload(Some(status))).unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[test]
    fn other_residents_are_forbidden() {
        let someone = user(UserRole::Treasurer);
        let err = authorize_dues_update(&someone, &dues_of(Uuid::new_v4(), PaymentStatus::Unpaid), payload(None)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn owner_cannot_reopen_dues_closed_by_an_admin() {
        let owner = user(UserRole::Resident);
        for closed in [PaymentStatus::Paid, PaymentStatus::Cancelled] {
            for wanted in [PaymentStatus::Unpaid, PaymentStatus::PendingConfirmation] {
                let err = authorize_dues_update(&owner, &dues_of(owner.id, closed), payload(Some(wanted))).unwrap_err();
                assert!(matches!(err, AppError::Forbidden(_)));
            }
        }

        let chair = user(UserRole::Chair);
        let out = authorize_dues_update(&chair, &dues_of(owner.id, PaymentStatus::Paid), payload(Some(PaymentStatus::Unpaid))).unwrap();
        assert_eq!(out.payment_status, Some(PaymentStatus::Unpaid));
    }
}
