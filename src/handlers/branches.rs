// src/handlers/branches.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::tenancy::TenantScope,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "NORTE")]
    pub code: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchPayload {
    pub name: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

pub async fn create_branch(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Json(payload): Json<CreateBranchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let branch = app_state
        .catalog_service
        .create_branch(
            scope.0,
            &payload.name,
            &payload.code,
            &payload.address,
            &payload.phone,
            payload.active,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn list_branches(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let branches = app_state.catalog_service.list_branches(scope.0).await?;
    Ok(Json(branches))
}

pub async fn get_branch(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let branch = app_state.catalog_service.get_branch(scope.0, id).await?;
    Ok(Json(branch))
}

pub async fn update_branch(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBranchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let branch = app_state
        .catalog_service
        .update_branch(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.code.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.active,
        )
        .await?;

    Ok(Json(branch))
}

pub async fn delete_branch(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_branch(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
