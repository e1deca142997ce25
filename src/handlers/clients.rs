// src/handlers/clients.rs

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
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub reference: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    pub name: Option<String>,
    pub reference: Option<String>,
}

pub async fn create_client(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .catalog_service
        .create_client(scope.0, &payload.name, &payload.reference)
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list_clients(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.catalog_service.list_clients(scope.0).await?;
    Ok(Json(clients))
}

pub async fn get_client(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.catalog_service.get_client(scope.0, id).await?;
    Ok(Json(client))
}

pub async fn update_client(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .catalog_service
        .update_client(scope.0, id, payload.name.as_deref(), payload.reference.as_deref())
        .await?;

    Ok(Json(client))
}

pub async fn delete_client(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_client(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
