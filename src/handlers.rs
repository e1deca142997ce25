pub mod auth;
pub mod branches;
pub mod clients;
pub mod organizations;
pub mod payments;
pub mod products;
pub mod sales;
pub mod sellers;
