pub mod contact;
pub mod error;
pub mod message;
pub mod product;
pub mod session;
pub mod settings;

// Contact import pipeline module
pub mod import;
