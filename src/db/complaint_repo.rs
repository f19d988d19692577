// src/db/complaint_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::complaint::{
        Complaint, ComplaintDetail, ComplaintStatus, CreateComplaintPayload, UpdateComplaintPayload,
        DEFAULT_COMPLAINT_CATEGORY,
    },
};

#[derive(Clone)]
pub struct ComplaintRepository {
    pool: PgPool,
}

impl ComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        reporter_id: Uuid,
        payload: CreateComplaintPayload,
    ) -> Result<Complaint, AppError> {
        let category = payload
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPLAINT_CATEGORY.to_string());

        let row = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints (reporter_id, title, body, photo_url, category, location)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(reporter_id)
        .bind(payload.title)
        .bind(payload.body)
        .bind(payload.photo_url)
        .bind(category)
        .bind(payload.location)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(
        &self,
        status: Option<ComplaintStatus>,
        reporter_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> Result<Vec<ComplaintDetail>, AppError> {
        let rows = sqlx::query_as::<_, ComplaintDetail>(
            r#"
            SELECT c.*, u.full_name AS reporter_name
            FROM complaints c
            LEFT JOIN users u ON u.id = c.reporter_id
            WHERE ($1::complaint_status IS NULL OR c.status = $1)
              AND ($2::uuid IS NULL OR c.reporter_id = $2)
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $3
            "#,
        )
        .bind(status)
        .bind(reporter_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>, AppError> {
        let row = sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateComplaintPayload,
    ) -> Result<Option<Complaint>, AppError> {
        let row = sqlx::query_as::<_, Complaint>(
            r#"
            UPDATE complaints SET
                status = COALESCE($2, status),
                admin_response = COALESCE($3, admin_response)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.status)
        .bind(changes.admin_response)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
