// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, map_protected_delete},
    models::catalog::Product,
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        name: &str,
        price: Decimal,
        category: &str,
        description: &str,
        active: bool,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (organization_id, name, price, category, description, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, name, price, category, description, active,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(description)
        .bind(active)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    /// Listagem escopada, com filtros opcionais de ativo, categoria e
    /// sucursal (o filtro de sucursal atravessa a associação N:N).
    pub async fn list(
        &self,
        organization_id: Uuid,
        active: Option<bool>,
        category: Option<&str>,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.organization_id, p.name, p.price, p.category, p.description,
                   p.active, p.created_at, p.updated_at
            FROM products p
            WHERE p.organization_id = $1
              AND ($2::boolean IS NULL OR p.active = $2)
              AND ($3::varchar IS NULL OR p.category = $3)
              AND ($4::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM branch_products bp
                  WHERE bp.product_id = p.id AND bp.branch_id = $4
              ))
            ORDER BY p.name ASC
            "#,
        )
        .bind(organization_id)
        .bind(active)
        .bind(category)
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, organization_id, name, price, category, description, active,
                    created_at, updated_at
             FROM products
             WHERE organization_id = $1 AND id = $2",
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        price: Option<Decimal>,
        category: Option<&str>,
        description: Option<&str>,
        active: Option<bool>,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($3, name),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                description = COALESCE($6, description),
                active = COALESCE($7, active),
                updated_at = NOW()
            WHERE organization_id = $1 AND id = $2
            RETURNING id, organization_id, name, price, category, description, active,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(description)
        .bind(active)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE organization_id = $1 AND id = $2")
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_protected_delete(e, "produto"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Vincula o produto a uma sucursal (passo explícito de pós-criação).
    pub async fn link_branch<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        branch_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO branch_products (branch_id, product_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(branch_id)
        .bind(product_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Substitui o conjunto de sucursais do produto dentro da organização.
    pub async fn set_branches(
        &self,
        conn: &mut sqlx::PgConnection,
        organization_id: Uuid,
        product_id: Uuid,
        branch_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM branch_products WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO branch_products (branch_id, product_id)
             SELECT b.id, $2
             FROM branches b
             WHERE b.organization_id = $1 AND b.id = ANY($3)",
        )
        .bind(organization_id)
        .bind(product_id)
        .bind(branch_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
