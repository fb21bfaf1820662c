use crate::application::use_cases::auth::AuthUseCase;
use crate::application::use_cases::broadcast::BroadcastUseCase;
use crate::application::use_cases::contact_import::ContactImportUseCase;
use crate::application::use_cases::product_import::ProductImportUseCase;
use crate::application::use_cases::settings::SettingsUseCase;
use crate::domain::import::ImportFlow;
use crate::infrastructure::api_client::ApiClient;
use crate::interfaces::http::LogEntry;
use crate::interfaces::mock_server::MockApiState;
use std::sync::{Arc, Mutex};

pub struct AppState {
    pub auth_use_case: AuthUseCase,
    pub contact_import_use_case: ContactImportUseCase,
    pub product_import_use_case: ProductImportUseCase,
    pub broadcast_use_case: BroadcastUseCase,
    pub settings_use_case: SettingsUseCase,
    pub api_client: Arc<dyn ApiClient>,
    /// One contact-import flow per service instance; the UI drives it
    /// through the preview/import endpoints.
    pub import_flow: Mutex<ImportFlow>,
    pub mock_server: Arc<MockApiState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}
