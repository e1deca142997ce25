// src/handlers/products.rs

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
    common::{error::AppError, validate::validate_positive_price},
    config::AppState,
    middleware::tenancy::TenantScope,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_positive_price"))]
    #[schema(example = 25.90)]
    pub price: Decimal,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_active")]
    pub active: bool,

    // Sem a lista, o produto entra na sucursal PRINCIPAL
    pub branches: Option<Vec<Uuid>>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub name: Option<String>,

    #[validate(custom(function = "validate_positive_price"))]
    pub price: Option<Decimal>,

    pub category: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub branches: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub active: Option<bool>,
    pub category: Option<String>,
    // Escopo adicional para telas de vendedor
    pub branch_id: Option<Uuid>,
}

pub async fn create_product(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .create_product(
            scope.0,
            &payload.name,
            payload.price,
            &payload.category,
            &payload.description,
            payload.active,
            payload.branches.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .catalog_service
        .list_products(scope.0, query.active, query.category.as_deref(), query.branch_id)
        .await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(scope.0, id).await?;
    Ok(Json(product))
}

pub async fn update_product(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .update_product(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.price,
            payload.category.as_deref(),
            payload.description.as_deref(),
            payload.active,
            payload.branches.as_deref(),
        )
        .await?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_product(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
