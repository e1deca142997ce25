// src/db/sale_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sale::{Sale, SaleItem, SaleItemWithProduct, SaleWithNames},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ESCRITA (sempre dentro da transação do serviço)
    // =========================================================================

    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
        seller_id: Uuid,
        client_id: Uuid,
        payment_method_id: Uuid,
        total: Decimal,
        notes: &str,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (organization_id, branch_id, seller_id, client_id,
                               payment_method_id, total, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, branch_id, seller_id, client_id,
                      payment_method_id, total, notes, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(branch_id)
        .bind(seller_id)
        .bind(client_id)
        .bind(payment_method_id)
        .bind(total)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        sale_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        price: Decimal,
        subtotal: Decimal,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (organization_id, sale_id, product_id, quantity, price, subtotal)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, sale_id, product_id, quantity, price,
                      subtotal, created_at
            "#,
        )
        .bind(organization_id)
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .bind(subtotal)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    /// Listagem escopada com nomes das entidades relacionadas, mais
    /// recente primeiro. Filtros opcionais de vendedor e sucursal.
    pub async fn list(
        &self,
        organization_id: Uuid,
        seller_id: Option<Uuid>,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<SaleWithNames>, AppError> {
        let sales = sqlx::query_as::<_, SaleWithNames>(
            r#"
            SELECT v.id, v.organization_id, v.branch_id, b.name AS branch_name,
                   v.seller_id, s.name AS seller_name,
                   v.client_id, c.name AS client_name,
                   v.payment_method_id, pm.name AS payment_method_name,
                   v.total, v.notes, v.created_at, v.updated_at
            FROM sales v
            JOIN sellers s ON s.id = v.seller_id
            JOIN clients c ON c.id = v.client_id
            JOIN payment_methods pm ON pm.id = v.payment_method_id
            LEFT JOIN branches b ON b.id = v.branch_id
            WHERE v.organization_id = $1
              AND ($2::uuid IS NULL OR v.seller_id = $2)
              AND ($3::uuid IS NULL OR v.branch_id = $3)
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(organization_id)
        .bind(seller_id)
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    pub async fn find_with_names(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<SaleWithNames>, AppError> {
        let sale = sqlx::query_as::<_, SaleWithNames>(
            r#"
            SELECT v.id, v.organization_id, v.branch_id, b.name AS branch_name,
                   v.seller_id, s.name AS seller_name,
                   v.client_id, c.name AS client_name,
                   v.payment_method_id, pm.name AS payment_method_name,
                   v.total, v.notes, v.created_at, v.updated_at
            FROM sales v
            JOIN sellers s ON s.id = v.seller_id
            JOIN clients c ON c.id = v.client_id
            JOIN payment_methods pm ON pm.id = v.payment_method_id
            LEFT JOIN branches b ON b.id = v.branch_id
            WHERE v.organization_id = $1 AND v.id = $2
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Itens (com nome do produto) das vendas informadas, na ordem de criação.
    pub async fn items_for_sales(
        &self,
        sale_ids: &[Uuid],
    ) -> Result<Vec<SaleItemWithProduct>, AppError> {
        let items = sqlx::query_as::<_, SaleItemWithProduct>(
            r#"
            SELECT i.id, i.sale_id, i.product_id, p.name AS product_name,
                   i.quantity, i.price, i.subtotal
            FROM sale_items i
            JOIN products p ON p.id = i.product_id
            WHERE i.sale_id = ANY($1)
            ORDER BY i.sale_id, i.created_at ASC
            "#,
        )
        .bind(sale_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Exclui a venda; os itens caem em cascata no banco.
    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE organization_id = $1 AND id = $2")
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
