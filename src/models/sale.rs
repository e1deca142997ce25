// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validate::validate_not_negative;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub organization_id: Uuid,
    // Nula apenas quando a organização não tem sucursal PRINCIPAL
    pub branch_id: Option<Uuid>,
    pub seller_id: Uuid,
    pub client_id: Uuid,
    pub payment_method_id: Uuid,
    pub total: Decimal,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    // Sempre price × quantity, recalculado no servidor
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

// Linha de venda com os nomes das entidades relacionadas, para listagens
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithNames {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub branch_name: Option<String>,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub payment_method_id: Uuid,
    pub payment_method_name: String,
    pub total: Decimal,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemWithProduct {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub subtotal: Decimal,
}

// Venda completa: cabeçalho + itens
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: SaleWithNames,
    pub items: Vec<SaleItemWithProduct>,
}

// Linha de item enviada na criação da venda. O `subtotal` é aceito por
// compatibilidade com clientes antigos, mas o servidor sempre recalcula
// price × quantity: o valor recebido nunca é lido.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemInput {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser no mínimo 1."))]
    #[serde(default = "default_quantity")]
    #[schema(example = 2)]
    pub quantity: i32,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[allow(dead_code)]
    pub subtotal: Option<Decimal>,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub branch_id: Option<Uuid>,
    pub seller_id: Uuid,
    pub client_id: Uuid,
    pub payment_method_id: Uuid,

    #[serde(default)]
    pub notes: String,

    #[validate(nested)]
    pub items: Vec<SaleItemInput>,
}
