// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::seller_login,
        handlers::auth::refresh_token,
        handlers::auth::get_me,

        // --- Organizations ---
        handlers::organizations::list_organizations,
        handlers::organizations::get_organization,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::delete_sale,

        // --- Reports ---
        handlers::sales::sales_summary,
        handlers::sales::sales_by_seller,
        handlers::sales::sales_by_payment_method,
        handlers::sales::seller_commissions,
        handlers::sales::top_products,
        handlers::sales::client_stats,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::SellerLoginPayload,
            models::auth::RefreshPayload,
            models::auth::AuthResponse,
            models::auth::SellerAuthResponse,
            models::auth::RefreshResponse,

            // --- Organizations ---
            models::organization::Organization,

            // --- Catalog ---
            models::catalog::Branch,
            models::catalog::Seller,
            models::catalog::Client,
            models::catalog::Product,
            models::catalog::PaymentMethod,

            // --- Sales ---
            models::sale::Sale,
            models::sale::SaleItem,
            models::sale::SaleWithNames,
            models::sale::SaleItemWithProduct,
            models::sale::SaleDetail,
            models::sale::CreateSalePayload,
            models::sale::SaleItemInput,

            // --- Reports ---
            models::reports::SalesSummary,
            models::reports::SellerTotals,
            models::reports::PaymentMethodSummary,
            models::reports::SellerCommission,
            models::reports::TopProduct,
            models::reports::ClientStats,

            // --- Payloads de catálogo ---
            handlers::branches::CreateBranchPayload,
            handlers::branches::UpdateBranchPayload,
            handlers::sellers::CreateSellerPayload,
            handlers::sellers::UpdateSellerPayload,
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::payments::CreatePaymentMethodPayload,
            handlers::payments::UpdatePaymentMethodPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, registro e tokens"),
        (name = "Organizations", description = "Consulta de organizações"),
        (name = "Sales", description = "Registro e consulta de vendas"),
        (name = "Reports", description = "Relatórios e comissões")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
