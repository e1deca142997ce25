// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedPrincipal,
    models::auth::{
        AuthResponse, LoginPayload, Principal, RefreshPayload, RefreshResponse, RegisterPayload,
        SellerAuthResponse, SellerLoginPayload,
    },
};

// POST /api/v1/auth/register
// Cria organização + sucursal PRINCIPAL + usuário admin, tudo ou nada.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Organização e admin criados", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail ou slug já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (user, tokens) = app_state
        .auth_service
        .register(
            &payload.email,
            &payload.password,
            &payload.full_name,
            &payload.organization_name,
            payload.primary_color.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user,
            access: tokens.access,
            refresh: tokens.refresh,
        }),
    ))
}

// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (user, tokens) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        user,
        access: tokens.access,
        refresh: tokens.refresh,
    }))
}

// POST /api/v1/auth/seller-login
// Vendedores entram pelo código numérico, sem senha de usuário.
#[utoipa::path(
    post,
    path = "/api/v1/auth/seller-login",
    tag = "Auth",
    request_body = SellerLoginPayload,
    responses(
        (status = 200, description = "Login de vendedor efetuado", body = SellerAuthResponse),
        (status = 404, description = "Código de vendedor inválido ou inativo")
    )
)]
pub async fn seller_login(
    State(app_state): State<AppState>,
    Json(payload): Json<SellerLoginPayload>,
) -> Result<Json<SellerAuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (seller, tokens) = app_state
        .auth_service
        .seller_login(&payload.numeric_code, payload.organization_slug.as_deref())
        .await?;

    Ok(Json(SellerAuthResponse {
        seller,
        access: tokens.access,
        refresh: tokens.refresh,
    }))
}

// POST /api/v1/auth/token/refresh
#[utoipa::path(
    post,
    path = "/api/v1/auth/token/refresh",
    tag = "Auth",
    request_body = RefreshPayload,
    responses(
        (status = 200, description = "Novo token de acesso", body = RefreshResponse),
        (status = 401, description = "Refresh token inválido")
    )
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<RefreshResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let access = app_state.auth_service.refresh(&payload.refresh).await?;

    Ok(Json(RefreshResponse { access }))
}

// GET /api/v1/auth/me (rota protegida)
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Principal autenticado"),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Json<Principal> {
    Json(principal)
}
