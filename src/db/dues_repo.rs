// src/db/dues_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dues::{Dues, DuesDetail, DuesTerms, PaymentStatus, UpdateDuesPayload},
};

#[derive(Clone)]
pub struct DuesRepository {
    pool: PgPool,
}

impl DuesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, resident_id: Uuid, creator_id: Uuid, terms: &DuesTerms) -> Result<Dues, AppError> {
        let row = sqlx::query_as::<_, Dues>(
            r#"
            INSERT INTO dues (
                resident_id, creator_id, title, dues_type, category,
                amount, due_date, period_month, period_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(resident_id)
        .bind(creator_id)
        .bind(&terms.title)
        .bind(&terms.dues_type)
        .bind(&terms.category)
        .bind(terms.amount)
        .bind(terms.due_date)
        .bind(terms.period_month)
        .bind(terms.period_year)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // Uma cobrança para cada usuário com role RESIDENT, na transação do chamador
    pub async fn create_for_all_residents<'e, E>(
        &self,
        executor: E,
        creator_id: Uuid,
        terms: &DuesTerms,
    ) -> Result<Vec<Dues>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Dues>(
            r#"
            INSERT INTO dues (
                resident_id, creator_id, title, dues_type, category,
                amount, due_date, period_month, period_year
            )
            SELECT u.id, $1, $2, $3, $4, $5, $6, $7, $8
            FROM users u
            WHERE u.role = 'RESIDENT'
            RETURNING *
            "#,
        )
        .bind(creator_id)
        .bind(&terms.title)
        .bind(&terms.dues_type)
        .bind(&terms.category)
        .bind(terms.amount)
        .bind(terms.due_date)
        .bind(terms.period_month)
        .bind(terms.period_year)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn list(
        &self,
        resident_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<DuesDetail>, AppError> {
        let rows = sqlx::query_as::<_, DuesDetail>(
            r#"
            SELECT d.*, r.full_name AS resident_name, c.full_name AS creator_name
            FROM dues d
            LEFT JOIN users r ON r.id = d.resident_id
            LEFT JOIN users c ON c.id = d.creator_id
            WHERE ($1::uuid IS NULL OR d.resident_id = $1)
            ORDER BY d.created_at DESC, d.id DESC
            LIMIT $2
            "#,
        )
        .bind(resident_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Dues>, AppError> {
        let row = sqlx::query_as::<_, Dues>("SELECT * FROM dues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, changes: UpdateDuesPayload) -> Result<Option<Dues>, AppError> {
        let row = sqlx::query_as::<_, Dues>(
            r#"
            UPDATE dues SET
                title = COALESCE($2, title),
                dues_type = COALESCE($3, dues_type),
                category = COALESCE($4, category),
                amount = COALESCE($5, amount),
                due_date = COALESCE($6, due_date),
                period_month = COALESCE($7, period_month),
                period_year = COALESCE($8, period_year),
                payment_status = COALESCE($9, payment_status),
                payment_proof_url = COALESCE($10, payment_proof_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.dues_type)
        .bind(changes.category)
        .bind(changes.amount)
        .bind(changes.due_date)
        .bind(changes.period_month)
        .bind(changes.period_year)
        .bind(changes.payment_status)
        .bind(changes.payment_proof_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    // Comprovante enviado: grava a URL e move para PendingConfirmation
    pub async fn attach_proof(&self, id: Uuid, proof_url: &str) -> Result<Option<Dues>, AppError> {
        let row = sqlx::query_as::<_, Dues>(
            r#"
            UPDATE dues SET payment_proof_url = $2, payment_status = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(proof_url)
        .bind(PaymentStatus::PendingConfirmation)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM dues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
