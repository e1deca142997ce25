// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{common::error::AppError, config::AppState, models::auth::Principal};

// O middleware em si: valida o bearer token e injeta o principal
// (usuário admin ou vendedor) nos extensions da requisição.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(authorization) = auth_header.ok_or(AppError::InvalidToken)?;

    let principal = app_state
        .auth_service
        .validate_token(authorization.token())
        .await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

// Extrator para obter o principal autenticado diretamente nos handlers
pub struct AuthenticatedPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthenticatedPrincipal)
            .ok_or(AppError::InvalidToken)
    }
}
