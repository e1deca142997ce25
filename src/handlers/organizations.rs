// src/handlers/organizations.rs
//
// Superfície somente-leitura: o cadastro acontece no /auth/register.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::organization::Organization};

// GET /api/v1/organizations
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "Organizations",
    responses(
        (status = 200, description = "Lista de organizações", body = Vec<Organization>)
    )
)]
pub async fn list_organizations(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let organizations = app_state.organization_repo.list().await?;
    Ok(Json(organizations))
}

// GET /api/v1/organizations/{lookup}
// Aceita slug ou id: tenta o slug primeiro, depois o id.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{lookup}",
    tag = "Organizations",
    params(("lookup" = String, Path, description = "Slug ou UUID da organização")),
    responses(
        (status = 200, description = "Organização encontrada", body = Organization),
        (status = 404, description = "Organização não encontrada")
    )
)]
pub async fn get_organization(
    State(app_state): State<AppState>,
    Path(lookup): Path<String>,
) -> Result<Json<Organization>, AppError> {
    if let Some(organization) = app_state.organization_repo.find_by_slug(&lookup).await? {
        return Ok(Json(organization));
    }

    if let Ok(id) = lookup.parse::<Uuid>() {
        if let Some(organization) = app_state.organization_repo.find_by_id(id).await? {
            return Ok(Json(organization));
        }
    }

    Err(AppError::OrganizationNotFound)
}
