// src/main.rs

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/seller-login", post(handlers::auth::seller_login))
        .route("/token/refresh", post(handlers::auth::refresh_token));

    // /auth/me precisa de token
    let me_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Organizações: somente leitura, lookup por slug ou id
    let organization_routes = Router::new()
        .route("/", get(handlers::organizations::list_organizations))
        .route("/{lookup}", get(handlers::organizations::get_organization));

    let branch_routes = Router::new()
        .route(
            "/",
            post(handlers::branches::create_branch).get(handlers::branches::list_branches),
        )
        .route(
            "/{id}",
            get(handlers::branches::get_branch)
                .put(handlers::branches::update_branch)
                .delete(handlers::branches::delete_branch),
        );

    let seller_routes = Router::new()
        .route(
            "/",
            post(handlers::sellers::create_seller).get(handlers::sellers::list_sellers),
        )
        .route(
            "/{id}",
            get(handlers::sellers::get_seller)
                .put(handlers::sellers::update_seller)
                .delete(handlers::sellers::delete_seller),
        );

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        );

    let payment_routes = Router::new()
        .route(
            "/",
            post(handlers::payments::create_payment_method)
                .get(handlers::payments::list_payment_methods),
        )
        .route(
            "/{id}",
            get(handlers::payments::get_payment_method)
                .put(handlers::payments::update_payment_method)
                .delete(handlers::payments::delete_payment_method),
        );

    // Vendas + relatórios do motor de comissões
    let sale_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sale).get(handlers::sales::list_sales),
        )
        .route("/summary", get(handlers::sales::sales_summary))
        .route("/by_seller", get(handlers::sales::sales_by_seller))
        .route(
            "/by_payment_method",
            get(handlers::sales::sales_by_payment_method),
        )
        .route(
            "/seller_commissions",
            get(handlers::sales::seller_commissions),
        )
        .route("/top_products", get(handlers::sales::top_products))
        .route("/client_stats", get(handlers::sales::client_stats))
        .route(
            "/{id}",
            get(handlers::sales::get_sale).delete(handlers::sales::delete_sale),
        );

    // Todo recurso escopado exige principal autenticado
    let scoped_routes = Router::new()
        .nest("/branches", branch_routes)
        .nest("/sellers", seller_routes)
        .nest("/clients", client_routes)
        .nest("/products", product_routes)
        .nest("/payment-methods", payment_routes)
        .nest("/sales", sale_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", me_routes)
        .nest("/api/v1/organizations", organization_routes)
        .nest("/api/v1", scoped_routes)
        .merge(
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
