// src/middleware/tenancy.rs

use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::Principal};

// Parâmetro de escopo explícito, usado quando o principal não carrega
// organização (ex.: staff da plataforma).
#[derive(Debug, Deserialize)]
struct ScopeQuery {
    organization_id: Option<Uuid>,
}

/// O escopo de tenant da requisição, já resolvido. Todo handler de
/// recurso escopado recebe este extrator: não existe caminho "sem
/// organização".
#[derive(Debug, Clone, Copy)]
pub struct TenantScope(pub Uuid);

impl<S> FromRequestParts<S> for TenantScope
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // O principal foi injetado pelo auth_middleware
        let principal = parts.extensions.get::<Principal>().cloned();

        // `organization_id` malformado é tratado como ausente: a
        // resolução segue pelas outras fontes ou é recusada.
        let explicit = Query::<ScopeQuery>::try_from_uri(&parts.uri)
            .map(|q| q.0.organization_id)
            .unwrap_or(None);

        let organization_id = app_state
            .scope_service
            .resolve(principal.as_ref(), explicit)
            .await?;

        Ok(TenantScope(organization_id))
    }
}
