// src/db/user_repo.rs

use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::auth::{AdminUpdateUserPayload, RegisterUserPayload, User, UserRole},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário. Duplicidade (email, NIK, telefone) vira erro de domínio.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        payload: &RegisterUserPayload,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                national_id, family_card_id, full_name, password_hash,
                address, rt_code, rw_code, phone, email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&payload.national_id)
        .bind(&payload.family_card_id)
        .bind(&payload.full_name)
        .bind(password_hash)
        .bind(&payload.address)
        .bind(&payload.rt_code)
        .bind(&payload.rw_code)
        .bind(&payload.phone)
        .bind(&payload.email)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn recent_residents(&self, limit: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = 'RESIDENT' ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // Campos ausentes (None) mantêm o valor atual
    pub async fn update(
        &self,
        id: Uuid,
        changes: AdminUpdateUserPayload,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                national_id = COALESCE($2, national_id),
                family_card_id = COALESCE($3, family_card_id),
                full_name = COALESCE($4, full_name),
                address = COALESCE($5, address),
                rt_code = COALESCE($6, rt_code),
                rw_code = COALESCE($7, rw_code),
                phone = COALESCE($8, phone),
                email = COALESCE($9, email),
                role = COALESCE($10, role),
                account_status = COALESCE($11, account_status),
                household_members = COALESCE($12, household_members)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.national_id)
        .bind(changes.family_card_id)
        .bind(changes.full_name)
        .bind(changes.address)
        .bind(changes.rt_code)
        .bind(changes.rw_code)
        .bind(changes.phone)
        .bind(changes.email)
        .bind(changes.role)
        .bind(changes.account_status)
        .bind(changes.household_members.map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
