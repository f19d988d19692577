// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, models::dashboard::AdminStats};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await?;
        Ok(total)
    }

    // Soma dos Paid agrupada pelo período; sem linhas no período → 0
    pub async fn paid_dues_sum(&self, month: i16, year: i32) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT SUM(amount)
            FROM dues
            WHERE payment_status = 'PAID' AND period_month = $1 AND period_year = $2
            GROUP BY period_month, period_year
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(total.unwrap_or(Decimal::ZERO))
    }

    // Todas as contagens em paralelo; só monta o resultado depois que todas voltam
    pub async fn stats(&self, month: i16, year: i32) -> Result<AdminStats, AppError> {
        let (
            total_users,
            total_residents,
            total_announcements,
            total_complaints,
            pending_complaints,
            total_dues,
            dues_paid_this_month,
            total_events,
            total_businesses,
            total_letter_requests,
        ) = tokio::try_join!(
            self.count("SELECT COUNT(*) FROM users"),
            self.count("SELECT COUNT(*) FROM users WHERE role = 'RESIDENT'"),
            self.count("SELECT COUNT(*) FROM announcements"),
            self.count("SELECT COUNT(*) FROM complaints"),
            self.count("SELECT COUNT(*) FROM complaints WHERE status IN ('RECEIVED', 'IN_PROGRESS')"),
            self.count("SELECT COUNT(*) FROM dues"),
            self.paid_dues_sum(month, year),
            self.count("SELECT COUNT(*) FROM events"),
            self.count("SELECT COUNT(*) FROM businesses"),
            self.count("SELECT COUNT(*) FROM letter_requests"),
        )?;

        Ok(AdminStats {
            total_users,
            total_residents,
            total_announcements,
            total_complaints,
            pending_complaints,
            total_dues,
            dues_paid_this_month,
            total_events,
            total_businesses,
            total_letter_requests,
        })
    }
}
