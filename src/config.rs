// src/config.rs

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::{
        AnnouncementRepository, BusinessRepository, ComplaintRepository, DashboardRepository,
        DuesRepository, EventRepository, LetterRepository, UserRepository,
    },
    services::{
        announcement_service::AnnouncementService,
        auth::AuthService,
        business_service::BusinessService,
        complaint_service::ComplaintService,
        dashboard_service::{ActivitySources, DashboardService},
        dues_service::DuesService,
        event_service::EventService,
        letter_service::LetterService,
        upload_service::UploadStore,
        user_service::UserService,
    },
};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_JWT_TTL_HOURS: i64 = 168;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_APP_ENV: &str = "development";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub jwt_ttl_hours: i64,
    pub upload_dir: PathBuf,
    pub app_env: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Separado do ambiente real para poder testar
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let port = match get("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT inválida: {}", raw))?,
            None => DEFAULT_PORT,
        };
        let jwt_ttl_hours = match get("JWT_TTL_HOURS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("JWT_TTL_HOURS inválido: {}", raw))?,
            None => DEFAULT_JWT_TTL_HOURS,
        };
        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {}", raw))?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            jwt_ttl_hours,
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            app_env: get("APP_ENV").unwrap_or_else(|| DEFAULT_APP_ENV.to_string()),
            db_max_connections,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<AppConfig>,
    pub upload_store: UploadStore,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub announcement_service: AnnouncementService,
    pub complaint_service: ComplaintService,
    pub dues_service: DuesService,
    pub event_service: EventService,
    pub business_service: BusinessService,
    pub letter_service: LetterService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Só monta o gráfico de dependências; conectar e migrar fica no main
    pub fn new(db_pool: PgPool, config: AppConfig) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let announcement_repo = AnnouncementRepository::new(db_pool.clone());
        let complaint_repo = ComplaintRepository::new(db_pool.clone());
        let dues_repo = DuesRepository::new(db_pool.clone());
        let event_repo = EventRepository::new(db_pool.clone());
        let business_repo = BusinessRepository::new(db_pool.clone());
        let letter_repo = LetterRepository::new(db_pool.clone());
        let upload_store = UploadStore::new(config.upload_dir.clone());

        let dashboard_service = DashboardService::new(
            DashboardRepository::new(db_pool.clone()),
            ActivitySources {
                users: user_repo.clone(),
                announcements: announcement_repo.clone(),
                complaints: complaint_repo.clone(),
                dues: dues_repo.clone(),
                events: event_repo.clone(),
                businesses: business_repo.clone(),
                letters: letter_repo.clone(),
            },
        );

        Self {
            auth_service: AuthService::new(
                user_repo.clone(),
                db_pool.clone(),
                config.jwt_secret.clone(),
                config.jwt_ttl_hours,
            ),
            user_service: UserService::new(user_repo.clone()),
            announcement_service: AnnouncementService::new(announcement_repo),
            complaint_service: ComplaintService::new(complaint_repo),
            dues_service: DuesService::new(dues_repo, user_repo.clone(), upload_store.clone(), db_pool.clone()),
            event_service: EventService::new(event_repo),
            business_service: BusinessService::new(business_repo, user_repo),
            letter_service: LetterService::new(letter_repo, upload_store.clone()),
            dashboard_service,
            upload_store,
            config: Arc::new(config),
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/warga"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.jwt_ttl_hours, 168);
        assert_eq!(cfg.upload_dir, PathBuf::from("uploads"));
        assert_eq!(cfg.db_max_connections, 5);
        assert!(!cfg.is_production());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let blank = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  "), ("JWT_SECRET", "x")]));
        assert!(blank.is_err());
    }

    #[test]
    fn explicit_values_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/warga"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("APP_ENV", "Production"),
            ("UPLOAD_DIR", "/var/lib/warga/uploads"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.is_production());
        assert_eq!(cfg.upload_dir, PathBuf::from("/var/lib/warga/uploads"));

        let bad = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/warga"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "abc"),
        ]));
        assert!(bad.is_err());
    }
}
