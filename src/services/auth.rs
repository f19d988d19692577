// src/services/auth.rs

use std::sync::OnceLock;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AccountStatus, AuthResponse, Claims, CurrentUser, RegisterUserPayload, User},
};

// Hash de comparação para emails desconhecidos; gerado uma vez, no primeiro uso
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash("wargaconnect-dummy-password", bcrypt::DEFAULT_COST).unwrap_or_default())
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    pool: PgPool,
    jwt_secret: String,
    jwt_ttl_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, pool: PgPool, jwt_secret: String, jwt_ttl_hours: i64) -> Self {
        Self {
            user_repo,
            pool,
            jwt_secret,
            jwt_ttl_hours,
        }
    }

    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<AuthResponse, AppError> {
        // Hashing fora do runtime assíncrono
        let password_clone = payload.password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .user_repo
            .create_user(&self.pool, payload, &hashed_password)
            .await?;

        tracing::info!("👤 Novo usuário registrado: {}", user.id);

        let token = self.create_token(&user)?;
        Ok(AuthResponse {
            message: "Registration successful".to_string(),
            user,
            token,
        })
    }

    // Email inexistente e senha errada devolvem exatamente o mesmo erro, com o mesmo custo de bcrypt
    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.user_repo.find_by_email(email).await?;

        let password_clone = password.to_owned();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(h) => verify(&password_clone, &h),
            None => {
                let _ = verify(&password_clone, dummy_hash());
                Ok(false)
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        let Some(user) = user.filter(|_| is_password_valid) else {
            tracing::warn!("Login recusado: credenciais inválidas");
            return Err(AppError::InvalidCredentials);
        };

        if user.account_status == AccountStatus::Inactive {
            return Err(AppError::Forbidden("Account is inactive".to_string()));
        }

        let token = self.create_token(&user)?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            user,
            token,
        })
    }

    // Token válido + usuário ainda existente → identidade da requisição
    pub async fn resolve_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.decode_token(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("User no longer exists".to_string()))?;

        Ok(CurrentUser::from(&user))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.jwt_ttl_hours);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
