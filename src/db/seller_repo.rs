// src/db/seller_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, map_protected_delete},
    models::catalog::Seller,
};

#[derive(Clone)]
pub struct SellerRepository {
    pool: PgPool,
}

impl SellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        name: &str,
        numeric_code: &str,
        commission_percentage: Decimal,
        active: bool,
    ) -> Result<Seller, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            INSERT INTO sellers (organization_id, name, numeric_code, commission_percentage, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, name, numeric_code, commission_percentage,
                      active, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(numeric_code)
        .bind(commission_percentage)
        .bind(active)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "O código numérico '{}' já existe nesta organização.",
                        numeric_code
                    ));
                }
            }
            e.into()
        })?;

        Ok(seller)
    }

    pub async fn list(
        &self,
        organization_id: Uuid,
        active: Option<bool>,
    ) -> Result<Vec<Seller>, AppError> {
        let sellers = sqlx::query_as::<_, Seller>(
            "SELECT id, organization_id, name, numeric_code, commission_percentage,
                    active, created_at, updated_at
             FROM sellers
             WHERE organization_id = $1
               AND ($2::boolean IS NULL OR active = $2)
             ORDER BY name ASC",
        )
        .bind(organization_id)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        Ok(sellers)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Seller>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seller = sqlx::query_as::<_, Seller>(
            "SELECT id, organization_id, name, numeric_code, commission_percentage,
                    active, created_at, updated_at
             FROM sellers
             WHERE organization_id = $1 AND id = $2",
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(seller)
    }

    // Sem escopo de organização: usado só para reidratar o principal a
    // partir do `sub` do token.
    pub async fn find_by_id_global(&self, id: Uuid) -> Result<Option<Seller>, AppError> {
        let seller = sqlx::query_as::<_, Seller>(
            "SELECT id, organization_id, name, numeric_code, commission_percentage,
                    active, created_at, updated_at
             FROM sellers
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    /// Login do vendedor: código numérico ativo, com slug opcional da
    /// organização para desambiguar códigos repetidos entre tenants.
    pub async fn find_active_by_code(
        &self,
        numeric_code: &str,
        organization_slug: Option<&str>,
    ) -> Result<Option<Seller>, AppError> {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            SELECT s.id, s.organization_id, s.name, s.numeric_code,
                   s.commission_percentage, s.active, s.created_at, s.updated_at
            FROM sellers s
            JOIN organizations o ON o.id = s.organization_id
            WHERE s.numeric_code = $1
              AND s.active = TRUE
              AND ($2::varchar IS NULL OR o.slug = $2)
            LIMIT 1
            "#,
        )
        .bind(numeric_code)
        .bind(organization_slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        numeric_code: Option<&str>,
        commission_percentage: Option<Decimal>,
        active: Option<bool>,
    ) -> Result<Option<Seller>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            UPDATE sellers
            SET name = COALESCE($3, name),
                numeric_code = COALESCE($4, numeric_code),
                commission_percentage = COALESCE($5, commission_percentage),
                active = COALESCE($6, active),
                updated_at = NOW()
            WHERE organization_id = $1 AND id = $2
            RETURNING id, organization_id, name, numeric_code, commission_percentage,
                      active, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(numeric_code)
        .bind(commission_percentage)
        .bind(active)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "O código numérico informado já existe nesta organização.".to_string(),
                    );
                }
            }
            e.into()
        })?;

        Ok(seller)
    }

    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sellers WHERE organization_id = $1 AND id = $2")
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_protected_delete(e, "vendedor"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Vincula o vendedor a uma sucursal (passo explícito de pós-criação).
    pub async fn link_branch<'e, E>(
        &self,
        executor: E,
        seller_id: Uuid,
        branch_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO branch_sellers (branch_id, seller_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(branch_id)
        .bind(seller_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Substitui o conjunto de sucursais do vendedor. Só aceita sucursais
    /// da mesma organização. Recebe a conexão da transação em andamento,
    /// pois executa mais de um comando.
    pub async fn set_branches(
        &self,
        conn: &mut sqlx::PgConnection,
        organization_id: Uuid,
        seller_id: Uuid,
        branch_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM branch_sellers WHERE seller_id = $1")
            .bind(seller_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO branch_sellers (branch_id, seller_id)
             SELECT b.id, $2
             FROM branches b
             WHERE b.organization_id = $1 AND b.id = ANY($3)",
        )
        .bind(organization_id)
        .bind(seller_id)
        .bind(branch_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
