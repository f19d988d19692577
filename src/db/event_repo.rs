// src/db/event_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::event::{CreateEventPayload, Event, EventDetail, UpdateEventPayload},
};

const DETAIL_SELECT: &str = r#"
    SELECT e.*, u.full_name AS organizer_name
    FROM events e
    LEFT JOIN users u ON u.id = e.organizer_id
"#;

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, organizer_id: Uuid, payload: CreateEventPayload) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, description, event_date, location, organizer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.event_date)
        .bind(payload.location)
        .bind(organizer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // Listagem pública: os mais próximos primeiro
    pub async fn list_by_event_date(&self) -> Result<Vec<EventDetail>, AppError> {
        let sql = format!("{} ORDER BY e.event_date ASC, e.created_at DESC, e.id DESC", DETAIL_SELECT);
        let rows = sqlx::query_as::<_, EventDetail>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    // Feed do painel: os cadastrados mais recentemente
    pub async fn recent(&self, limit: i64) -> Result<Vec<EventDetail>, AppError> {
        let sql = format!("{} ORDER BY e.created_at DESC, e.id DESC LIMIT $1", DETAIL_SELECT);
        let rows = sqlx::query_as::<_, EventDetail>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let row = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, changes: UpdateEventPayload) -> Result<Option<Event>, AppError> {
        let row = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                location = COALESCE($5, location)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.event_date)
        .bind(changes.location)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
