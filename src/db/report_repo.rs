// src/db/report_repo.rs
//
// Consultas de leitura do motor de relatórios. Agregados simples ficam
// no SQL; os agrupamentos com cálculo de comissão buscam linhas cruas e
// são consolidados em código, com Decimal, no report_service.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reports::{ClientStats, CommissionRow, SaleItemRow, SalesSummary, SellerTotals},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Contagem e soma do conjunto escopado
    pub async fn summary(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<SalesSummary, AppError> {
        let summary = sqlx::query_as::<_, SalesSummary>(
            r#"
            SELECT COUNT(*) AS total_sales,
                   COALESCE(SUM(total), 0) AS total_amount
            FROM sales
            WHERE organization_id = $1
              AND ($2::uuid IS NULL OR branch_id = $2)
            "#,
        )
        .bind(organization_id)
        .bind(branch_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    pub async fn totals_by_seller(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<SellerTotals>, AppError> {
        let totals = sqlx::query_as::<_, SellerTotals>(
            r#"
            SELECT s.id AS seller_id,
                   s.name AS seller_name,
                   COUNT(v.id) AS total_sales,
                   COALESCE(SUM(v.total), 0) AS total_amount
            FROM sales v
            JOIN sellers s ON s.id = v.seller_id
            WHERE v.organization_id = $1
              AND ($2::uuid IS NULL OR v.branch_id = $2)
            GROUP BY s.id, s.name
            ORDER BY total_amount DESC
            "#,
        )
        .bind(organization_id)
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Linhas cruas para os agrupamentos de comissão: cada venda com o
    /// percentual do seu vendedor e do seu método de pagamento. O
    /// intervalo de datas (quando presente) é inclusivo nos dois lados.
    pub async fn commission_rows(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<CommissionRow>, AppError> {
        let (start, end) = match range {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        let rows = sqlx::query_as::<_, CommissionRow>(
            r#"
            SELECT v.seller_id,
                   s.name AS seller_name,
                   s.commission_percentage AS seller_commission_percentage,
                   v.total,
                   pm.id AS payment_method_id,
                   pm.name AS payment_method_name,
                   pm.commission_percentage AS method_commission_percentage
            FROM sales v
            JOIN sellers s ON s.id = v.seller_id
            LEFT JOIN payment_methods pm ON pm.id = v.payment_method_id
            WHERE v.organization_id = $1
              AND ($2::uuid IS NULL OR v.branch_id = $2)
              AND ($3::timestamptz IS NULL OR v.created_at >= $3)
              AND ($4::timestamptz IS NULL OR v.created_at <= $4)
            ORDER BY v.created_at ASC
            "#,
        )
        .bind(organization_id)
        .bind(branch_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Linhas cruas de itens do conjunto escopado, para o ranking de produtos.
    pub async fn item_rows(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<SaleItemRow>, AppError> {
        let rows = sqlx::query_as::<_, SaleItemRow>(
            r#"
            SELECT i.product_id,
                   p.name AS product_name,
                   i.quantity,
                   i.subtotal
            FROM sale_items i
            JOIN products p ON p.id = i.product_id
            JOIN sales v ON v.id = i.sale_id
            WHERE v.organization_id = $1
              AND ($2::uuid IS NULL OR v.branch_id = $2)
            "#,
        )
        .bind(organization_id)
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // Compras por cliente: contagem e última compra
    pub async fn client_stats(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<ClientStats>, AppError> {
        let stats = sqlx::query_as::<_, ClientStats>(
            r#"
            SELECT client_id,
                   COUNT(*) AS purchase_count,
                   MAX(created_at) AS last_purchase
            FROM sales
            WHERE organization_id = $1
              AND ($2::uuid IS NULL OR branch_id = $2)
            GROUP BY client_id
            ORDER BY purchase_count DESC
            "#,
        )
        .bind(organization_id)
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }
}
