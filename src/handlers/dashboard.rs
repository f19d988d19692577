// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::{error::AppError, extract::ApiQuery},
    config::AppState,
    models::dashboard::{ActivityItem, ActivityQuery, AdminStats},
};

// Rotas de /api/admin já passam pelo admin_guard

// GET /api/admin/stats
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Contagens e soma das iurans pagas no mês corrente", body = AdminStats),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<Json<AdminStats>, AppError> {
    Ok(Json(app_state.dashboard_service.stats().await?))
}

// GET /api/admin/activity?limit=10
#[utoipa::path(
    get,
    path = "/api/admin/activity",
    tag = "Admin",
    params(("limit" = Option<String>, Query, description = "Máximo de itens (padrão 10)")),
    responses(
        (status = 200, description = "Atividades recentes de todas as coleções", body = Vec<ActivityItem>),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_activity(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<ActivityQuery>,
) -> Result<Json<Vec<ActivityItem>>, AppError> {
    let items = app_state
        .dashboard_service
        .recent_activity(query.effective_limit())
        .await?;
    Ok(Json(items))
}
