// src/models/reports.rs
//
// Tipos do motor de comissões e relatórios. Os structs `*Row` são as
// linhas cruas buscadas no banco; os demais são os agregados expostos
// pela API. Todo valor monetário permanece como Decimal até a
// serialização (números JSON, nunca strings).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Contagem e soma do conjunto escopado, sem agrupamento
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerTotals {
    pub seller_id: Uuid,
    pub seller_name: String,
    pub total_sales: i64,
    pub total_amount: Decimal,
}

// Agregado por método de pagamento, com a comissão da operadora deduzida
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSummary {
    pub payment_method_id: Uuid,
    pub payment_method_name: String,
    pub count: i64,
    pub total: Decimal,
    pub commission: Decimal,
    pub commission_percentage: Decimal,
    pub net_amount: Decimal,
}

// Comissão do vendedor sobre o valor líquido (total − taxa dos métodos
// de pagamento). O vendedor não ganha comissão sobre dinheiro que a
// organização nunca recebeu por inteiro.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerCommission {
    pub seller_id: Uuid,
    pub seller_name: String,
    pub total_sales: Decimal,
    pub payment_method_commission: Decimal,
    pub net_amount: Decimal,
    pub commission_percentage: Decimal,
    pub commission_amount: Decimal,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub total: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub client_id: Uuid,
    pub purchase_count: i64,
    pub last_purchase: Option<DateTime<Utc>>,
}

// Linha crua para o agrupamento de comissões: uma venda com o seu
// vendedor e o seu método de pagamento (quando houver).
#[derive(Debug, Clone, FromRow)]
pub struct CommissionRow {
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_commission_percentage: Decimal,
    pub total: Decimal,
    pub payment_method_id: Option<Uuid>,
    pub payment_method_name: Option<String>,
    pub method_commission_percentage: Option<Decimal>,
}

// Linha crua de item para o ranking de produtos
#[derive(Debug, Clone, FromRow)]
pub struct SaleItemRow {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: Decimal,
}
