pub mod rest;

use crate::domain::contact::Contact;
use crate::domain::error::Result;
use crate::domain::product::NewProduct;
use crate::domain::session::LoginResponse;
use crate::domain::settings::BusinessSettings;
use async_trait::async_trait;

pub use rest::RestApiClient;

/// Capability boundary for everything that talks to the remote platform API.
/// Use cases depend on this trait; tests script it, production wires
/// [`RestApiClient`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
    async fn submit_contact(&self, phone: &str, category: &str) -> Result<()>;
    async fn list_contacts(&self, category: Option<&str>) -> Result<Vec<Contact>>;
    async fn create_product(&self, product: &NewProduct) -> Result<()>;
    async fn send_message(&self, phone: &str, body: &str) -> Result<()>;
    async fn fetch_settings(&self) -> Result<BusinessSettings>;
    async fn update_settings(&self, settings: &BusinessSettings) -> Result<()>;
}
