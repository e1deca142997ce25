// src/db/payment_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, map_protected_delete},
    models::catalog::PaymentMethod,
};

#[derive(Clone)]
pub struct PaymentMethodRepository {
    pool: PgPool,
}

impl PaymentMethodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        commission_percentage: Decimal,
        active: bool,
    ) -> Result<PaymentMethod, AppError> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            INSERT INTO payment_methods (organization_id, name, commission_percentage, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, organization_id, name, active, commission_percentage,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(commission_percentage)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok(method)
    }

    pub async fn list(
        &self,
        organization_id: Uuid,
        active: Option<bool>,
    ) -> Result<Vec<PaymentMethod>, AppError> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, organization_id, name, active, commission_percentage,
                    created_at, updated_at
             FROM payment_methods
             WHERE organization_id = $1
               AND ($2::boolean IS NULL OR active = $2)
             ORDER BY name ASC",
        )
        .bind(organization_id)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        Ok(methods)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PaymentMethod>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let method = sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, organization_id, name, active, commission_percentage,
                    created_at, updated_at
             FROM payment_methods
             WHERE organization_id = $1 AND id = $2",
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(method)
    }

    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        commission_percentage: Option<Decimal>,
        active: Option<bool>,
    ) -> Result<Option<PaymentMethod>, AppError> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            UPDATE payment_methods
            SET name = COALESCE($3, name),
                commission_percentage = COALESCE($4, commission_percentage),
                active = COALESCE($5, active),
                updated_at = NOW()
            WHERE organization_id = $1 AND id = $2
            RETURNING id, organization_id, name, active, commission_percentage,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(commission_percentage)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(method)
    }

    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM payment_methods WHERE organization_id = $1 AND id = $2")
                .bind(organization_id)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_protected_delete(e, "método de pagamento"))?;

        Ok(result.rows_affected() > 0)
    }
}
