pub mod branch_repo;
pub use branch_repo::BranchRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod organization_repo;
pub use organization_repo::OrganizationRepository;
pub mod payment_repo;
pub use payment_repo::PaymentMethodRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod seller_repo;
pub use seller_repo::SellerRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
