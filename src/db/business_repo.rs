// src/db/business_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::business::{Business, BusinessDetail, CreateBusinessPayload, UpdateBusinessPayload},
};

const DETAIL_SELECT: &str = r#"
    SELECT b.*, u.full_name AS owner_name
    FROM businesses b
    LEFT JOIN users u ON u.id = b.owner_id
"#;

#[derive(Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: Uuid, payload: CreateBusinessPayload) -> Result<Business, AppError> {
        let row = sqlx::query_as::<_, Business>(
            r#"
            INSERT INTO businesses (owner_id, business_name, description, category, photo_url, phone, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(payload.business_name)
        .bind(payload.description)
        .bind(payload.category)
        .bind(payload.photo_url)
        .bind(payload.phone)
        .bind(payload.location)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        Ok(row)
    }

    pub async fn list_by_name(&self) -> Result<Vec<BusinessDetail>, AppError> {
        let sql = format!("{} ORDER BY b.business_name ASC", DETAIL_SELECT);
        let rows = sqlx::query_as::<_, BusinessDetail>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<BusinessDetail>, AppError> {
        let sql = format!("{} ORDER BY b.created_at DESC, b.id DESC LIMIT $1", DETAIL_SELECT);
        let rows = sqlx::query_as::<_, BusinessDetail>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, AppError> {
        let row = sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, changes: UpdateBusinessPayload) -> Result<Option<Business>, AppError> {
        let row = sqlx::query_as::<_, Business>(
            r#"
            UPDATE businesses SET
                business_name = COALESCE($2, business_name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                photo_url = COALESCE($5, photo_url),
                phone = COALESCE($6, phone),
                location = COALESCE($7, location)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.business_name)
        .bind(changes.description)
        .bind(changes.category)
        .bind(changes.photo_url)
        .bind(changes.phone)
        .bind(changes.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM businesses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
