// src/services/catalog_service.rs
//
// Regras de negócio do catálogo. A mais importante: vendedores e
// produtos criados sem lista de sucursais entram na sucursal PRINCIPAL
// como um passo explícito de pós-criação, dentro da mesma transação.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        BranchRepository, ClientRepository, PaymentMethodRepository, ProductRepository,
        SellerRepository,
    },
    models::catalog::{
        Branch, Client, PRINCIPAL_BRANCH_CODE, PaymentMethod, Product, Seller,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    branch_repo: BranchRepository,
    seller_repo: SellerRepository,
    client_repo: ClientRepository,
    product_repo: ProductRepository,
    payment_repo: PaymentMethodRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(
        branch_repo: BranchRepository,
        seller_repo: SellerRepository,
        client_repo: ClientRepository,
        product_repo: ProductRepository,
        payment_repo: PaymentMethodRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            branch_repo,
            seller_repo,
            client_repo,
            product_repo,
            payment_repo,
            pool,
        }
    }

    // =========================================================================
    //  SUCURSAIS
    // =========================================================================

    pub async fn create_branch(
        &self,
        organization_id: Uuid,
        name: &str,
        code: &str,
        address: &str,
        phone: &str,
        active: bool,
    ) -> Result<Branch, AppError> {
        self.branch_repo
            .create(&self.pool, organization_id, name, code, address, phone, active)
            .await
    }

    pub async fn list_branches(&self, organization_id: Uuid) -> Result<Vec<Branch>, AppError> {
        self.branch_repo.list(organization_id).await
    }

    pub async fn get_branch(&self, organization_id: Uuid, id: Uuid) -> Result<Branch, AppError> {
        self.branch_repo
            .find_by_id(&self.pool, organization_id, id)
            .await?
            .ok_or(AppError::BranchNotFound)
    }

    pub async fn update_branch(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        code: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        active: Option<bool>,
    ) -> Result<Branch, AppError> {
        self.branch_repo
            .update(organization_id, id, name, code, address, phone, active)
            .await?
            .ok_or(AppError::BranchNotFound)
    }

    pub async fn delete_branch(&self, organization_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.branch_repo.delete(organization_id, id).await? {
            return Err(AppError::BranchNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  VENDEDORES
    // =========================================================================

    pub async fn create_seller(
        &self,
        organization_id: Uuid,
        name: &str,
        numeric_code: &str,
        commission_percentage: Decimal,
        active: bool,
        branch_ids: Option<&[Uuid]>,
    ) -> Result<Seller, AppError> {
        let mut tx = self.pool.begin().await?;

        let seller = self
            .seller_repo
            .create(
                &mut *tx,
                organization_id,
                name,
                numeric_code,
                commission_percentage,
                active,
            )
            .await?;

        match branch_ids {
            Some(ids) => {
                self.seller_repo
                    .set_branches(&mut *tx, organization_id, seller.id, ids)
                    .await?;
            }
            // Sem lista de sucursais: entra na PRINCIPAL, quando ela existe
            None => {
                if let Some(principal) = self
                    .branch_repo
                    .find_by_code(&mut *tx, organization_id, PRINCIPAL_BRANCH_CODE)
                    .await?
                {
                    self.seller_repo
                        .link_branch(&mut *tx, seller.id, principal.id)
                        .await?;
                }
            }
        }

        tx.commit().await?;

        Ok(seller)
    }

    pub async fn list_sellers(
        &self,
        organization_id: Uuid,
        active: Option<bool>,
    ) -> Result<Vec<Seller>, AppError> {
        self.seller_repo.list(organization_id, active).await
    }

    pub async fn get_seller(&self, organization_id: Uuid, id: Uuid) -> Result<Seller, AppError> {
        self.seller_repo
            .find_by_id(&self.pool, organization_id, id)
            .await?
            .ok_or(AppError::SellerNotFound)
    }

    pub async fn update_seller(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        numeric_code: Option<&str>,
        commission_percentage: Option<Decimal>,
        active: Option<bool>,
        branch_ids: Option<&[Uuid]>,
    ) -> Result<Seller, AppError> {
        let mut tx = self.pool.begin().await?;

        let seller = self
            .seller_repo
            .update(
                &mut *tx,
                organization_id,
                id,
                name,
                numeric_code,
                commission_percentage,
                active,
            )
            .await?
            .ok_or(AppError::SellerNotFound)?;

        // As sucursais só mudam quando a lista é enviada
        if let Some(ids) = branch_ids {
            self.seller_repo
                .set_branches(&mut *tx, organization_id, seller.id, ids)
                .await?;
        }

        tx.commit().await?;

        Ok(seller)
    }

    pub async fn delete_seller(&self, organization_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.seller_repo.delete(organization_id, id).await? {
            return Err(AppError::SellerNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn create_client(
        &self,
        organization_id: Uuid,
        name: &str,
        reference: &str,
    ) -> Result<Client, AppError> {
        self.client_repo.create(organization_id, name, reference).await
    }

    pub async fn list_clients(&self, organization_id: Uuid) -> Result<Vec<Client>, AppError> {
        self.client_repo.list(organization_id).await
    }

    pub async fn get_client(&self, organization_id: Uuid, id: Uuid) -> Result<Client, AppError> {
        self.client_repo
            .find_by_id(&self.pool, organization_id, id)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    pub async fn update_client(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        reference: Option<&str>,
    ) -> Result<Client, AppError> {
        self.client_repo
            .update(organization_id, id, name, reference)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    pub async fn delete_client(&self, organization_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.client_repo.delete(organization_id, id).await? {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    pub async fn create_product(
        &self,
        organization_id: Uuid,
        name: &str,
        price: Decimal,
        category: &str,
        description: &str,
        active: bool,
        branch_ids: Option<&[Uuid]>,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .create(
                &mut *tx,
                organization_id,
                name,
                price,
                category,
                description,
                active,
            )
            .await?;

        match branch_ids {
            Some(ids) => {
                self.product_repo
                    .set_branches(&mut *tx, organization_id, product.id, ids)
                    .await?;
            }
            None => {
                if let Some(principal) = self
                    .branch_repo
                    .find_by_code(&mut *tx, organization_id, PRINCIPAL_BRANCH_CODE)
                    .await?
                {
                    self.product_repo
                        .link_branch(&mut *tx, product.id, principal.id)
                        .await?;
                }
            }
        }

        tx.commit().await?;

        Ok(product)
    }

    pub async fn list_products(
        &self,
        organization_id: Uuid,
        active: Option<bool>,
        category: Option<&str>,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<Product>, AppError> {
        self.product_repo
            .list(organization_id, active, category, branch_id)
            .await
    }

    pub async fn get_product(&self, organization_id: Uuid, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(&self.pool, organization_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn update_product(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        price: Option<Decimal>,
        category: Option<&str>,
        description: Option<&str>,
        active: Option<bool>,
        branch_ids: Option<&[Uuid]>,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .update(
                &mut *tx,
                organization_id,
                id,
                name,
                price,
                category,
                description,
                active,
            )
            .await?
            .ok_or(AppError::ProductNotFound)?;

        if let Some(ids) = branch_ids {
            self.product_repo
                .set_branches(&mut *tx, organization_id, product.id, ids)
                .await?;
        }

        tx.commit().await?;

        Ok(product)
    }

    pub async fn delete_product(&self, organization_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.product_repo.delete(organization_id, id).await? {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  MÉTODOS DE PAGAMENTO
    // =========================================================================

    pub async fn create_payment_method(
        &self,
        organization_id: Uuid,
        name: &str,
        commission_percentage: Decimal,
        active: bool,
    ) -> Result<PaymentMethod, AppError> {
        self.payment_repo
            .create(organization_id, name, commission_percentage, active)
            .await
    }

    pub async fn list_payment_methods(
        &self,
        organization_id: Uuid,
        active: Option<bool>,
    ) -> Result<Vec<PaymentMethod>, AppError> {
        self.payment_repo.list(organization_id, active).await
    }

    pub async fn get_payment_method(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<PaymentMethod, AppError> {
        self.payment_repo
            .find_by_id(&self.pool, organization_id, id)
            .await?
            .ok_or(AppError::PaymentMethodNotFound)
    }

    pub async fn update_payment_method(
        &self,
        organization_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        commission_percentage: Option<Decimal>,
        active: Option<bool>,
    ) -> Result<PaymentMethod, AppError> {
        self.payment_repo
            .update(organization_id, id, name, commission_percentage, active)
            .await?
            .ok_or(AppError::PaymentMethodNotFound)
    }

    pub async fn delete_payment_method(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        if !self.payment_repo.delete(organization_id, id).await? {
            return Err(AppError::PaymentMethodNotFound);
        }
        Ok(())
    }
}
