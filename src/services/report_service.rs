// src/services/report_service.rs
//
// Motor de comissões e relatórios. As consultas trazem linhas cruas do
// banco; o agrupamento e toda a aritmética de comissão acontecem aqui,
// em Decimal, do início ao fim da acumulação. A comissão do método de
// pagamento é descontada antes da comissão do vendedor: ninguém ganha
// comissão sobre dinheiro que a organização não recebeu por inteiro.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    common::{dates::day_range, error::AppError},
    db::ReportRepository,
    models::reports::{
        ClientStats, CommissionRow, PaymentMethodSummary, SaleItemRow, SalesSummary,
        SellerCommission, SellerTotals, TopProduct,
    },
};

// Quantos produtos entram no ranking
const TOP_PRODUCTS_LIMIT: usize = 10;

/// Comissão proporcional: `amount × percentage / 100`.
fn commission_for(amount: Decimal, percentage: Decimal) -> Decimal {
    amount * percentage / Decimal::ONE_HUNDRED
}

/// Agrupa as vendas por método de pagamento. Vendas sem método ficam de
/// fora; o resultado sai ordenado por total decrescente.
fn group_by_payment_method(rows: &[CommissionRow]) -> Vec<PaymentMethodSummary> {
    // BTreeMap para um percurso determinístico entre execuções
    let mut groups: BTreeMap<Uuid, PaymentMethodSummary> = BTreeMap::new();

    for row in rows {
        let (Some(method_id), Some(method_name), Some(method_pct)) = (
            row.payment_method_id,
            row.payment_method_name.as_deref(),
            row.method_commission_percentage,
        ) else {
            continue;
        };

        let entry = groups
            .entry(method_id)
            .or_insert_with(|| PaymentMethodSummary {
                payment_method_id: method_id,
                payment_method_name: method_name.to_string(),
                count: 0,
                total: Decimal::ZERO,
                commission: Decimal::ZERO,
                commission_percentage: method_pct,
                net_amount: Decimal::ZERO,
            });

        entry.count += 1;
        entry.total += row.total;
        entry.commission += commission_for(row.total, method_pct);
    }

    let mut result: Vec<PaymentMethodSummary> = groups
        .into_values()
        .map(|mut summary| {
            summary.net_amount = summary.total - summary.commission;
            summary
        })
        .collect();

    result.sort_by(|a, b| b.total.cmp(&a.total));
    result
}

/// Agrupa por vendedor: total de vendas, comissão dos métodos de
/// pagamento (calculada venda a venda, com o método de cada uma),
/// líquido e comissão do vendedor sobre o líquido.
fn group_seller_commissions(rows: &[CommissionRow]) -> Vec<SellerCommission> {
    let mut groups: BTreeMap<Uuid, SellerCommission> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry(row.seller_id).or_insert_with(|| SellerCommission {
            seller_id: row.seller_id,
            seller_name: row.seller_name.clone(),
            total_sales: Decimal::ZERO,
            payment_method_commission: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            commission_percentage: row.seller_commission_percentage,
            commission_amount: Decimal::ZERO,
        });

        entry.total_sales += row.total;

        // Venda sem método de pagamento conta no total, mas não desconta taxa
        if let Some(method_pct) = row.method_commission_percentage {
            entry.payment_method_commission += commission_for(row.total, method_pct);
        }
    }

    let mut result: Vec<SellerCommission> = groups
        .into_values()
        .map(|mut c| {
            c.net_amount = c.total_sales - c.payment_method_commission;
            c.commission_amount = commission_for(c.net_amount, c.commission_percentage);
            c
        })
        .collect();

    result.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    result
}

/// Soma quantidade e subtotal por produto e devolve os `limit` maiores
/// por subtotal somado.
fn group_top_products(rows: &[SaleItemRow], limit: usize) -> Vec<TopProduct> {
    let mut groups: BTreeMap<Uuid, TopProduct> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry(row.product_id).or_insert_with(|| TopProduct {
            product_id: row.product_id,
            product_name: row.product_name.clone(),
            quantity: 0,
            total: Decimal::ZERO,
        });

        entry.quantity += i64::from(row.quantity);
        entry.total += row.subtotal;
    }

    let mut result: Vec<TopProduct> = groups.into_values().collect();
    result.sort_by(|a, b| b.total.cmp(&a.total));
    result.truncate(limit);
    result
}

#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    time_zone: Tz,
}

impl ReportService {
    pub fn new(report_repo: ReportRepository, time_zone: Tz) -> Self {
        Self { report_repo, time_zone }
    }

    pub async fn summary(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<SalesSummary, AppError> {
        self.report_repo.summary(organization_id, branch_id).await
    }

    pub async fn by_seller(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<SellerTotals>, AppError> {
        self.report_repo
            .totals_by_seller(organization_id, branch_id)
            .await
    }

    pub async fn by_payment_method(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<PaymentMethodSummary>, AppError> {
        let rows = self
            .report_repo
            .commission_rows(organization_id, branch_id, None)
            .await?;

        Ok(group_by_payment_method(&rows))
    }

    /// Comissões dos vendedores, opcionalmente restritas a um dia
    /// (intervalo inclusivo na zona configurada do deployment).
    pub async fn seller_commissions(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
        date: Option<&str>,
    ) -> Result<Vec<SellerCommission>, AppError> {
        let range = match date {
            Some(raw) => {
                Some(day_range(raw, self.time_zone).ok_or(AppError::InvalidDateFilter)?)
            }
            None => None,
        };

        let rows = self
            .report_repo
            .commission_rows(organization_id, branch_id, range)
            .await?;

        Ok(group_seller_commissions(&rows))
    }

    pub async fn top_products(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<TopProduct>, AppError> {
        let rows = self.report_repo.item_rows(organization_id, branch_id).await?;

        Ok(group_top_products(&rows, TOP_PRODUCTS_LIMIT))
    }

    pub async fn client_stats(
        &self,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<ClientStats>, AppError> {
        self.report_repo.client_stats(organization_id, branch_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn row(
        seller: (Uuid, &str, &str),
        total: &str,
        method: Option<(Uuid, &str, &str)>,
    ) -> CommissionRow {
        CommissionRow {
            seller_id: seller.0,
            seller_name: seller.1.to_string(),
            seller_commission_percentage: dec(seller.2),
            total: dec(total),
            payment_method_id: method.map(|m| m.0),
            payment_method_name: method.map(|m| m.1.to_string()),
            method_commission_percentage: method.map(|m| dec(m.2)),
        }
    }

    #[test]
    fn por_metodo_de_pagamento_deduz_comissao_e_ordena_por_total() {
        let seller = (Uuid::new_v4(), "Ana", "0");
        let method_a = (Uuid::new_v4(), "Efectivo", "10");
        let method_b = (Uuid::new_v4(), "Tarjeta", "5");

        let rows = vec![
            row(seller, "100", Some(method_a)),
            row(seller, "200", Some(method_b)),
        ];

        let result = group_by_payment_method(&rows);
        assert_eq!(result.len(), 2);

        // B vem primeiro: total 200 > 100
        assert_eq!(result[0].payment_method_id, method_b.0);
        assert_eq!(result[0].count, 1);
        assert_eq!(result[0].total, dec("200"));
        assert_eq!(result[0].commission, dec("10.00"));
        assert_eq!(result[0].net_amount, dec("190.00"));

        assert_eq!(result[1].payment_method_id, method_a.0);
        assert_eq!(result[1].count, 1);
        assert_eq!(result[1].total, dec("100"));
        assert_eq!(result[1].commission, dec("10.00"));
        assert_eq!(result[1].net_amount, dec("90.00"));
    }

    #[test]
    fn vendas_sem_metodo_ficam_fora_do_agrupamento_por_metodo() {
        let seller = (Uuid::new_v4(), "Ana", "0");
        let rows = vec![row(seller, "100", None)];

        assert!(group_by_payment_method(&rows).is_empty());
    }

    #[test]
    fn comissao_do_vendedor_incide_sobre_o_liquido() {
        // Vendedor com 20%, venda de 100 num método de 10%:
        // taxa 10 → líquido 90 → comissão 18
        let seller = (Uuid::new_v4(), "Ana", "20");
        let method = (Uuid::new_v4(), "Tarjeta", "10");

        let rows = vec![row(seller, "100", Some(method))];

        let result = group_seller_commissions(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total_sales, dec("100"));
        assert_eq!(result[0].payment_method_commission, dec("10.00"));
        assert_eq!(result[0].net_amount, dec("90.00"));
        assert_eq!(result[0].commission_amount, dec("18.0000"));
    }

    #[test]
    fn cada_venda_desconta_a_taxa_do_proprio_metodo() {
        let seller = (Uuid::new_v4(), "Ana", "10");
        let method_a = (Uuid::new_v4(), "Efectivo", "0");
        let method_b = (Uuid::new_v4(), "Tarjeta", "5");

        let rows = vec![
            row(seller, "100", Some(method_a)),
            row(seller, "100", Some(method_b)),
            // Venda sem método entra no total sem descontar taxa
            row(seller, "50", None),
        ];

        let result = group_seller_commissions(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total_sales, dec("250"));
        assert_eq!(result[0].payment_method_commission, dec("5.00"));
        assert_eq!(result[0].net_amount, dec("245.00"));
        // 10% de 245
        assert_eq!(result[0].commission_amount, dec("24.5000"));
    }

    #[test]
    fn ranking_de_produtos_soma_quantidades_e_ordena_por_subtotal() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();

        let rows = vec![
            SaleItemRow {
                product_id: p1,
                product_name: "Café".to_string(),
                quantity: 2,
                subtotal: dec("20"),
            },
            SaleItemRow {
                product_id: p1,
                product_name: "Café".to_string(),
                quantity: 1,
                subtotal: dec("10"),
            },
            SaleItemRow {
                product_id: p2,
                product_name: "Açúcar".to_string(),
                quantity: 5,
                subtotal: dec("50"),
            },
        ];

        let result = group_top_products(&rows, 10);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].product_id, p2);
        assert_eq!(result[0].quantity, 5);
        assert_eq!(result[0].total, dec("50"));
        assert_eq!(result[1].product_id, p1);
        assert_eq!(result[1].quantity, 3);
        assert_eq!(result[1].total, dec("30"));
    }

    #[test]
    fn ranking_respeita_o_limite() {
        let rows: Vec<SaleItemRow> = (0..15)
            .map(|i| SaleItemRow {
                product_id: Uuid::new_v4(),
                product_name: format!("Produto {}", i),
                quantity: 1,
                subtotal: dec("10"),
            })
            .collect();

        assert_eq!(group_top_products(&rows, 10).len(), 10);
    }
}
