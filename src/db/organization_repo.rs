// src/db/organization_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::organization::Organization};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria a organização. Participa da transação de registro, que também
    /// cria a sucursal PRINCIPAL e o usuário admin.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
        primary_color: &str,
    ) -> Result<Organization, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, slug, primary_color)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, primary_color, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(primary_color)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "O slug '{}' já está em uso.",
                        slug
                    ));
                }
            }
            e.into()
        })?;

        Ok(organization)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<_, Organization>(
            "SELECT id, name, slug, primary_color, created_at, updated_at
             FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<_, Organization>(
            "SELECT id, name, slug, primary_color, created_at, updated_at
             FROM organizations WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }

    pub async fn list(&self) -> Result<Vec<Organization>, AppError> {
        let organizations = sqlx::query_as::<_, Organization>(
            "SELECT id, name, slug, primary_color, created_at, updated_at
             FROM organizations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(organizations)
    }
}
