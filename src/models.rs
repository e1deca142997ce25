pub mod auth;
pub mod catalog;
pub mod organization;
pub mod reports;
pub mod sale;
