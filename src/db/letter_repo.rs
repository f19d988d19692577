// src/db/letter_repo.rs

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::letter::{LetterDetail, LetterRequest, NewLetterRequest, UpdateLetterPayload},
};

#[derive(Clone)]
pub struct LetterRepository {
    pool: PgPool,
}

impl LetterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, applicant_id: Uuid, letter: NewLetterRequest) -> Result<LetterRequest, AppError> {
        let row = sqlx::query_as::<_, LetterRequest>(
            r#"
            INSERT INTO letter_requests (applicant_id, letter_type, purpose, notes, attachments)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(applicant_id)
        .bind(letter.letter_type)
        .bind(letter.purpose)
        .bind(letter.notes)
        .bind(Json(letter.attachments))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(
        &self,
        applicant_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<LetterDetail>, AppError> {
        let rows = sqlx::query_as::<_, LetterDetail>(
            r#"
            SELECT l.*, u.full_name AS applicant_name, u.email AS applicant_email
            FROM letter_requests l
            LEFT JOIN users u ON u.id = l.applicant_id
            WHERE ($1::uuid IS NULL OR l.applicant_id = $1)
            ORDER BY l.created_at DESC, l.id DESC
            LIMIT $2
            "#,
        )
        .bind(applicant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_detail(&self, id: Uuid) -> Result<Option<LetterDetail>, AppError> {
        let row = sqlx::query_as::<_, LetterDetail>(
            r#"
            SELECT l.*, u.full_name AS applicant_name, u.email AS applicant_email
            FROM letter_requests l
            LEFT JOIN users u ON u.id = l.applicant_id
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LetterRequest>, AppError> {
        let row = sqlx::query_as::<_, LetterRequest>("SELECT * FROM letter_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, changes: UpdateLetterPayload) -> Result<Option<LetterRequest>, AppError> {
        let row = sqlx::query_as::<_, LetterRequest>(
            r#"
            UPDATE letter_requests SET
                status = $2,
                admin_response = COALESCE($3, admin_response),
                generated_file_url = COALESCE($4, generated_file_url),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.status)
        .bind(changes.admin_response)
        .bind(changes.generated_file_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM letter_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
