// src/handlers/sellers.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validate::validate_percentage},
    config::AppState,
    middleware::tenancy::TenantScope,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSellerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O código numérico é obrigatório."))]
    #[schema(example = "1001")]
    pub numeric_code: String,

    #[validate(custom(function = "validate_percentage"))]
    #[serde(default)]
    #[schema(example = 10)]
    pub commission_percentage: Decimal,

    #[serde(default = "default_active")]
    pub active: bool,

    // Sem a lista, o vendedor entra na sucursal PRINCIPAL
    pub branches: Option<Vec<Uuid>>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellerPayload {
    pub name: Option<String>,
    pub numeric_code: Option<String>,

    // O validator só roda a função quando o campo vem preenchido
    #[validate(custom(function = "validate_percentage"))]
    pub commission_percentage: Option<Decimal>,

    pub active: Option<bool>,
    pub branches: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct SellerListQuery {
    pub active: Option<bool>,
}

pub async fn create_seller(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Json(payload): Json<CreateSellerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let seller = app_state
        .catalog_service
        .create_seller(
            scope.0,
            &payload.name,
            &payload.numeric_code,
            payload.commission_percentage,
            payload.active,
            payload.branches.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(seller)))
}

pub async fn list_sellers(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<SellerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sellers = app_state
        .catalog_service
        .list_sellers(scope.0, query.active)
        .await?;
    Ok(Json(sellers))
}

pub async fn get_seller(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let seller = app_state.catalog_service.get_seller(scope.0, id).await?;
    Ok(Json(seller))
}

pub async fn update_seller(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSellerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let seller = app_state
        .catalog_service
        .update_seller(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.numeric_code.as_deref(),
            payload.commission_percentage,
            payload.active,
            payload.branches.as_deref(),
        )
        .await?;

    Ok(Json(seller))
}

pub async fn delete_seller(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_seller(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
