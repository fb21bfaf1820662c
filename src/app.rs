use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::application::use_cases::auth::AuthUseCase;
use crate::application::use_cases::broadcast::BroadcastUseCase;
use crate::application::use_cases::contact_import::ContactImportUseCase;
use crate::application::use_cases::product_import::ProductImportUseCase;
use crate::application::use_cases::settings::SettingsUseCase;
use crate::domain::error::Result;
use crate::domain::import::ImportFlow;
use crate::domain::session::SharedSession;
use crate::infrastructure::api_client::{ApiClient, RestApiClient};
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server, LogEntry};
use crate::interfaces::mock_server::{start_mock_server, MockApiState};
use crate::interfaces::state::AppState;
use tracing::error;

/// Wire the use cases around one REST client and one session context.
pub fn build_state(
    config: &AppConfig,
    logs: Arc<Mutex<Vec<LogEntry>>>,
) -> Result<Arc<AppState>> {
    let session = SharedSession::new();
    let api: Arc<dyn ApiClient> = Arc::new(RestApiClient::new(config, session.clone())?);
    let mock_server = Arc::new(MockApiState::new(
        PathBuf::from(&config.mock_config_path),
        logs.clone(),
    ));

    Ok(Arc::new(AppState {
        auth_use_case: AuthUseCase::new(api.clone(), session.clone()),
        contact_import_use_case: ContactImportUseCase::new(api.clone()),
        product_import_use_case: ProductImportUseCase::new(api.clone()),
        broadcast_use_case: BroadcastUseCase::new(api.clone()),
        settings_use_case: SettingsUseCase::new(api.clone()),
        api_client: api,
        import_flow: Mutex::new(ImportFlow::new()),
        mock_server,
        logs,
    }))
}

pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let logs = Arc::new(Mutex::new(Vec::new()));
    let state = build_state(&config, logs.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    if config.mock_autostart {
        if let Err(e) = start_mock_server(state.mock_server.clone()).await {
            error!(error = %e, "Failed to autostart mock API");
        }
    }

    let server = start_server(state, logs.clone(), &config.http_host, config.http_port)?;
    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "Local service started on http://{}:{}",
            config.http_host, config.http_port
        ),
    );

    server.await
}
