// src/services/sale_service.rs
//
// Registro de vendas. A criação é tudo-ou-nada: cabeçalho e itens na
// mesma transação; qualquer item inválido desfaz a venda inteira.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        BranchRepository, ClientRepository, PaymentMethodRepository, ProductRepository,
        SaleRepository, SellerRepository,
    },
    models::{
        catalog::PRINCIPAL_BRANCH_CODE,
        sale::{CreateSalePayload, SaleDetail, SaleItemWithProduct},
    },
};

/// A única fonte de verdade do subtotal de um item. O valor que o
/// cliente manda no payload nunca chega ao banco.
pub fn line_subtotal(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}

#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    branch_repo: BranchRepository,
    seller_repo: SellerRepository,
    client_repo: ClientRepository,
    product_repo: ProductRepository,
    payment_repo: PaymentMethodRepository,
    pool: PgPool,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        branch_repo: BranchRepository,
        seller_repo: SellerRepository,
        client_repo: ClientRepository,
        product_repo: ProductRepository,
        payment_repo: PaymentMethodRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            sale_repo,
            branch_repo,
            seller_repo,
            client_repo,
            product_repo,
            payment_repo,
            pool,
        }
    }

    pub async fn create_sale(
        &self,
        organization_id: Uuid,
        payload: CreateSalePayload,
    ) -> Result<SaleDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // Toda referência da venda precisa pertencer à organização
        // resolvida. Um id de outro tenant é simplesmente "não existe".
        self.seller_repo
            .find_by_id(&mut *tx, organization_id, payload.seller_id)
            .await?
            .ok_or(AppError::SellerNotFound)?;

        self.client_repo
            .find_by_id(&mut *tx, organization_id, payload.client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        self.payment_repo
            .find_by_id(&mut *tx, organization_id, payload.payment_method_id)
            .await?
            .ok_or(AppError::PaymentMethodNotFound)?;

        // Sucursal: a informada, senão a PRINCIPAL da organização,
        // senão nenhuma.
        let branch_id = match payload.branch_id {
            Some(id) => Some(
                self.branch_repo
                    .find_by_id(&mut *tx, organization_id, id)
                    .await?
                    .ok_or(AppError::BranchNotFound)?
                    .id,
            ),
            None => self
                .branch_repo
                .find_by_code(&mut *tx, organization_id, PRINCIPAL_BRANCH_CODE)
                .await?
                .map(|b| b.id),
        };

        // Recalcula cada subtotal no servidor e soma o total da venda
        let mut lines = Vec::with_capacity(payload.items.len());
        let mut total = Decimal::ZERO;

        for item in &payload.items {
            self.product_repo
                .find_by_id(&mut *tx, organization_id, item.product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;

            let subtotal = line_subtotal(item.price, item.quantity);
            total += subtotal;
            lines.push((item.product_id, item.quantity, item.price, subtotal));
        }

        let sale = self
            .sale_repo
            .insert_sale(
                &mut *tx,
                organization_id,
                branch_id,
                payload.seller_id,
                payload.client_id,
                payload.payment_method_id,
                total,
                &payload.notes,
            )
            .await?;

        for (product_id, quantity, price, subtotal) in lines {
            self.sale_repo
                .insert_item(
                    &mut *tx,
                    organization_id,
                    sale.id,
                    product_id,
                    quantity,
                    price,
                    subtotal,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Venda {} registrada (total {})", sale.id, sale.total);

        self.get_sale(organization_id, sale.id).await
    }

    pub async fn list_sales(
        &self,
        organization_id: Uuid,
        seller_id: Option<Uuid>,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<SaleDetail>, AppError> {
        let sales = self
            .sale_repo
            .list(organization_id, seller_id, branch_id)
            .await?;

        let sale_ids: Vec<Uuid> = sales.iter().map(|s| s.id).collect();
        let mut items_by_sale: HashMap<Uuid, Vec<SaleItemWithProduct>> = HashMap::new();
        for item in self.sale_repo.items_for_sales(&sale_ids).await? {
            items_by_sale.entry(item.sale_id).or_default().push(item);
        }

        Ok(sales
            .into_iter()
            .map(|sale| {
                let items = items_by_sale.remove(&sale.id).unwrap_or_default();
                SaleDetail { sale, items }
            })
            .collect())
    }

    pub async fn get_sale(&self, organization_id: Uuid, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_with_names(organization_id, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        let items = self.sale_repo.items_for_sales(&[sale.id]).await?;

        Ok(SaleDetail { sale, items })
    }

    pub async fn delete_sale(&self, organization_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.sale_repo.delete(organization_id, id).await? {
            return Err(AppError::SaleNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::line_subtotal;
    use rust_decimal::Decimal;

    #[test]
    fn subtotal_e_sempre_preco_vezes_quantidade() {
        let price: Decimal = "10.50".parse().unwrap();
        assert_eq!(line_subtotal(price, 3), "31.50".parse::<Decimal>().unwrap());
        assert_eq!(line_subtotal(price, 1), price);
    }

    #[test]
    fn subtotal_nao_acumula_erro_binario() {
        // 0.10 somado 30 vezes dá exatamente 3.00 em Decimal
        let price: Decimal = "0.10".parse().unwrap();
        assert_eq!(line_subtotal(price, 30), "3.00".parse::<Decimal>().unwrap());
    }
}
