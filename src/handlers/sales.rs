// src/handlers/sales.rs
//
// Registro de vendas e os sub-recursos de relatório do motor de
// comissões. Tudo opera sobre o escopo resolvido pelo TenantScope.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantScope,
    models::{
        reports::{
            ClientStats, PaymentMethodSummary, SalesSummary, SellerCommission, SellerTotals,
            TopProduct,
        },
        sale::{CreateSalePayload, SaleDetail},
    },
};

#[derive(Debug, Deserialize)]
pub struct SaleListQuery {
    pub seller_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub branch_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CommissionQuery {
    pub branch_id: Option<Uuid>,
    // YYYY-MM-DD ou ISO-8601, interpretado na zona configurada
    pub date: Option<String>,
}

// POST /api/v1/sales
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada com seus itens", body = SaleDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Vendedor, cliente, método ou produto fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state.sale_service.create_sale(scope.0, payload).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/v1/sales
#[utoipa::path(
    get,
    path = "/api/v1/sales",
    tag = "Sales",
    params(
        ("seller_id" = Option<Uuid>, Query, description = "Filtra pelo vendedor"),
        ("branch_id" = Option<Uuid>, Query, description = "Filtra pela sucursal")
    ),
    responses(
        (status = 200, description = "Vendas do escopo, mais recentes primeiro", body = Vec<SaleDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<SaleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state
        .sale_service
        .list_sales(scope.0, query.seller_id, query.branch_id)
        .await?;
    Ok(Json(sales))
}

// GET /api/v1/sales/{id}
#[utoipa::path(
    get,
    path = "/api/v1/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com itens", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.get_sale(scope.0, id).await?;
    Ok(Json(sale))
}

// DELETE /api/v1/sales/{id}: os itens caem em cascata
#[utoipa::path(
    delete,
    path = "/api/v1/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda excluída"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.sale_service.delete_sale(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  RELATÓRIOS
// =============================================================================

// GET /api/v1/sales/summary
#[utoipa::path(
    get,
    path = "/api/v1/sales/summary",
    tag = "Reports",
    responses((status = 200, description = "Contagem e soma do escopo", body = SalesSummary)),
    security(("api_jwt" = []))
)]
pub async fn sales_summary(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .report_service
        .summary(scope.0, query.branch_id)
        .await?;
    Ok(Json(summary))
}

// GET /api/v1/sales/by_seller
#[utoipa::path(
    get,
    path = "/api/v1/sales/by_seller",
    tag = "Reports",
    responses((status = 200, description = "Totais por vendedor", body = Vec<SellerTotals>)),
    security(("api_jwt" = []))
)]
pub async fn sales_by_seller(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let totals = app_state
        .report_service
        .by_seller(scope.0, query.branch_id)
        .await?;
    Ok(Json(totals))
}

// GET /api/v1/sales/by_payment_method
#[utoipa::path(
    get,
    path = "/api/v1/sales/by_payment_method",
    tag = "Reports",
    responses((
        status = 200,
        description = "Totais por método, com comissão e líquido",
        body = Vec<PaymentMethodSummary>
    )),
    security(("api_jwt" = []))
)]
pub async fn sales_by_payment_method(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summaries = app_state
        .report_service
        .by_payment_method(scope.0, query.branch_id)
        .await?;
    Ok(Json(summaries))
}

// GET /api/v1/sales/seller_commissions
#[utoipa::path(
    get,
    path = "/api/v1/sales/seller_commissions",
    tag = "Reports",
    params(
        ("date" = Option<String>, Query, description = "Dia (YYYY-MM-DD ou ISO-8601) na zona configurada"),
        ("branch_id" = Option<Uuid>, Query, description = "Filtra pela sucursal")
    ),
    responses((
        status = 200,
        description = "Comissões líquidas por vendedor",
        body = Vec<SellerCommission>
    )),
    security(("api_jwt" = []))
)]
pub async fn seller_commissions(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<CommissionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let commissions = app_state
        .report_service
        .seller_commissions(scope.0, query.branch_id, query.date.as_deref())
        .await?;
    Ok(Json(commissions))
}

// GET /api/v1/sales/top_products
#[utoipa::path(
    get,
    path = "/api/v1/sales/top_products",
    tag = "Reports",
    responses((status = 200, description = "Dez produtos com maior receita", body = Vec<TopProduct>)),
    security(("api_jwt" = []))
)]
pub async fn top_products(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .report_service
        .top_products(scope.0, query.branch_id)
        .await?;
    Ok(Json(products))
}

// GET /api/v1/sales/client_stats
#[utoipa::path(
    get,
    path = "/api/v1/sales/client_stats",
    tag = "Reports",
    responses((status = 200, description = "Compras por cliente", body = Vec<ClientStats>)),
    security(("api_jwt" = []))
)]
pub async fn client_stats(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state
        .report_service
        .client_stats(scope.0, query.branch_id)
        .await?;
    Ok(Json(stats))
}
