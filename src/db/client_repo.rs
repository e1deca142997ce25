// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, map_protected_delete},
    models::catalog::Client,
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        organization_id: Uuid,
        name: &str,
        reference: &str,
    ) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (organization_id, name, reference)
            VALUES ($1, $2, $3)
            RETURNING id, organization_id, name, reference, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(reference)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, organization_id, name, reference, created_at, updated_at
             FROM clients
             WHERE organization_id = $1
             ORDER BY name ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, organization_id, name, reference, created_at, updated_at
             FROM clients
             WHERE organization_id = $1 AND id = $2",
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        reference: Option<&str>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($3, name),
                reference = COALESCE($4, reference),
                updated_at = NOW()
            WHERE organization_id = $1 AND id = $2
            RETURNING id, organization_id, name, reference, created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE organization_id = $1 AND id = $2")
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_protected_delete(e, "cliente"))?;

        Ok(result.rows_affected() > 0)
    }
}
