// src/handlers/payments.rs

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
pub struct CreatePaymentMethodPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Tarjeta de crédito")]
    pub name: String,

    // Taxa que a operadora desconta de cada venda neste método
    #[validate(custom(function = "validate_percentage"))]
    #[serde(default)]
    #[schema(example = 3.5)]
    pub commission_percentage: Decimal,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentMethodPayload {
    pub name: Option<String>,

    #[validate(custom(function = "validate_percentage"))]
    pub commission_percentage: Option<Decimal>,

    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentMethodListQuery {
    pub active: Option<bool>,
}

pub async fn create_payment_method(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Json(payload): Json<CreatePaymentMethodPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let method = app_state
        .catalog_service
        .create_payment_method(
            scope.0,
            &payload.name,
            payload.commission_percentage,
            payload.active,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(method)))
}

pub async fn list_payment_methods(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<PaymentMethodListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let methods = app_state
        .catalog_service
        .list_payment_methods(scope.0, query.active)
        .await?;
    Ok(Json(methods))
}

pub async fn get_payment_method(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let method = app_state
        .catalog_service
        .get_payment_method(scope.0, id)
        .await?;
    Ok(Json(method))
}

pub async fn update_payment_method(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentMethodPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let method = app_state
        .catalog_service
        .update_payment_method(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.commission_percentage,
            payload.active,
        )
        .await?;

    Ok(Json(method))
}

pub async fn delete_payment_method(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_payment_method(scope.0, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
