pub mod auth;
pub mod broadcast;
pub mod contact_import;
pub mod product_import;
pub mod settings;
