// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::{auth::AuthenticatedUser, rbac::AdminOnly},
    models::auth::{
        AdminUpdateUserPayload, AuthResponse, LoginUserPayload, RegisterUserPayload,
        UpdateProfilePayload, User, UserListQuery,
    },
};

// POST /api/users/register
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário registrado", body = AuthResponse),
        (status = 400, description = "Dados inválidos ou email/NIK/telefone já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.auth_service.register_user(&payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// POST /api/users/login
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 400, description = "Email ou senha inválidos"),
        (status = 403, description = "Conta inativa")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// GET /api/users/profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "Users",
    responses(
        (status = 200, description = "Perfil do usuário autenticado", body = User),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    let profile = app_state.user_service.get_profile(user.id).await?;
    Ok(Json(profile))
}

// PUT /api/users/profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "Users",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = User),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiJson(payload): ApiJson<UpdateProfilePayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let updated = app_state.user_service.update_profile(user.id, payload).await?;
    Ok(Json(updated))
}

// GET /api/users?role=resident
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(("role" = Option<String>, Query, description = "Filtra por papel (chair, treasurer, resident, security)")),
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<User>),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_service.list(query.role).await?;
    Ok(Json(users))
}

// PUT /api/users/:id
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = AdminUpdateUserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AdminUpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let updated = app_state.user_service.admin_update(id, payload).await?;
    Ok(Json(updated))
}

// DELETE /api/users/:id
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário removido", body = MessageResponse),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.user_service.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
