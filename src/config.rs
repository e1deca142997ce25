// src/config.rs

use chrono_tz::Tz;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        BranchRepository, ClientRepository, OrganizationRepository, PaymentMethodRepository,
        ProductRepository, ReportRepository, SaleRepository, SellerRepository, UserRepository,
    },
    services::{
        auth::AuthService, catalog_service::CatalogService, report_service::ReportService,
        sale_service::SaleService, scope_service::ScopeService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub organization_repo: OrganizationRepository,
    pub auth_service: AuthService,
    pub scope_service: ScopeService,
    pub catalog_service: CatalogService,
    pub sale_service: SaleService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Zona horária do deployment: os filtros de dia dos relatórios
        // são interpretados nela.
        let time_zone: Tz = env::var("APP_TIMEZONE")
            .unwrap_or_else(|_| "UTC".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("APP_TIMEZONE inválida: {}", e))?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let organization_repo = OrganizationRepository::new(db_pool.clone());
        let branch_repo = BranchRepository::new(db_pool.clone());
        let seller_repo = SellerRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let payment_repo = PaymentMethodRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo,
            seller_repo.clone(),
            organization_repo.clone(),
            branch_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let scope_service = ScopeService::new(organization_repo.clone());
        let catalog_service = CatalogService::new(
            branch_repo.clone(),
            seller_repo.clone(),
            client_repo.clone(),
            product_repo.clone(),
            payment_repo.clone(),
            db_pool.clone(),
        );
        let sale_service = SaleService::new(
            sale_repo,
            branch_repo,
            seller_repo,
            client_repo,
            product_repo,
            payment_repo,
            db_pool.clone(),
        );
        let report_service = ReportService::new(report_repo, time_zone);

        Ok(Self {
            db_pool,
            organization_repo,
            auth_service,
            scope_service,
            catalog_service,
            sale_service,
            report_service,
        })
    }
}
