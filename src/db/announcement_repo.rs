// src/db/announcement_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::announcement::{Announcement, AnnouncementDetail, UpdateAnnouncementPayload},
};

const DETAIL_SELECT: &str = r#"
    SELECT a.*, u.full_name AS author_name, u.role AS author_role
    FROM announcements a
    LEFT JOIN users u ON u.id = a.author_id
"#;

#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, author_id: Uuid, title: &str, body: &str) -> Result<Announcement, AppError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (author_id, title, body) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(author_id)
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(announcement)
    }

    // Mais recentes primeiro; `limit` None traz tudo
    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<AnnouncementDetail>, AppError> {
        let sql = format!("{} ORDER BY a.created_at DESC, a.id DESC LIMIT $1", DETAIL_SELECT);
        let rows = sqlx::query_as::<_, AnnouncementDetail>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>, AppError> {
        let row = sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateAnnouncementPayload,
    ) -> Result<Option<Announcement>, AppError> {
        let row = sqlx::query_as::<_, Announcement>(
            r#"
            UPDATE announcements SET
                title = COALESCE($2, title),
                body = COALESCE($3, body)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.body)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
