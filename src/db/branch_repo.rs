// src/db/branch_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, map_protected_delete},
    models::catalog::Branch,
};

#[derive(Clone)]
pub struct BranchRepository {
    pool: PgPool,
}

impl BranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        name: &str,
        code: &str,
        address: &str,
        phone: &str,
        active: bool,
    ) -> Result<Branch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (organization_id, name, code, address, phone, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, name, code, address, phone, active,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(name)
        .bind(code)
        .bind(address)
        .bind(phone)
        .bind(active)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "O código '{}' já existe nesta organização.",
                        code
                    ));
                }
            }
            e.into()
        })?;

        Ok(branch)
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<Branch>, AppError> {
        let branches = sqlx::query_as::<_, Branch>(
            "SELECT id, organization_id, name, code, address, phone, active,
                    created_at, updated_at
             FROM branches
             WHERE organization_id = $1
             ORDER BY name ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(branches)
    }

    // Toda busca é escopada pela organização: um id de outro tenant
    // simplesmente não existe aqui.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Branch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, organization_id, name, code, address, phone, active,
                    created_at, updated_at
             FROM branches
             WHERE organization_id = $1 AND id = $2",
        )
        .bind(organization_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(branch)
    }

    /// Busca pelo código dentro da organização (usado para a sucursal PRINCIPAL).
    pub async fn find_by_code<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        code: &str,
    ) -> Result<Option<Branch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, organization_id, name, code, address, phone, active,
                    created_at, updated_at
             FROM branches
             WHERE organization_id = $1 AND code = $2",
        )
        .bind(organization_id)
        .bind(code)
        .fetch_optional(executor)
        .await?;

        Ok(branch)
    }

    // Atualização parcial: campos ausentes mantêm o valor atual
    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        code: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        active: Option<bool>,
    ) -> Result<Option<Branch>, AppError> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches
            SET name = COALESCE($3, name),
                code = COALESCE($4, code),
                address = COALESCE($5, address),
                phone = COALESCE($6, phone),
                active = COALESCE($7, active),
                updated_at = NOW()
            WHERE organization_id = $1 AND id = $2
            RETURNING id, organization_id, name, code, address, phone, active,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(id)
        .bind(name)
        .bind(code)
        .bind(address)
        .bind(phone)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "O código informado já existe nesta organização.".to_string(),
                    );
                }
            }
            e.into()
        })?;

        Ok(branch)
    }

    /// Retorna `false` quando a sucursal não existe no escopo. Vendas
    /// associadas barram a exclusão (FK RESTRICT).
    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM branches WHERE organization_id = $1 AND id = $2")
            .bind(organization_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_protected_delete(e, "sucursal"))?;

        Ok(result.rows_affected() > 0)
    }
}
