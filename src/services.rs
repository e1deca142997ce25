pub mod auth;
pub mod catalog_service;
pub mod report_service;
pub mod sale_service;
pub mod scope_service;
