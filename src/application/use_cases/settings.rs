use std::sync::Arc;

use crate::domain::error::Result;
use crate::domain::settings::BusinessSettings;
use crate::infrastructure::api_client::ApiClient;
use tracing::info;
use validator::Validate;

pub struct SettingsUseCase {
    api: Arc<dyn ApiClient>,
}

impl SettingsUseCase {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<BusinessSettings> {
        self.api.fetch_settings().await
    }

    /// Validate the profile locally, then push it to the remote API.
    pub async fn update(&self, settings: &BusinessSettings) -> Result<BusinessSettings> {
        settings.validate()?;
        self.api.update_settings(settings).await?;
        info!(business = %settings.business_name, "Settings updated");
        Ok(settings.clone())
    }
}
