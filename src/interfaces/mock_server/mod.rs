// ============================================================
// MOCK PLATFORM API
// ============================================================
// A start/stoppable stand-in for the remote SaaS API so the
// service can be exercised with no backend. Failure injection
// is configurable: a list of always-failing phone numbers, a
// fail-every-N counter, and an artificial response delay.

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use uuid::Uuid;

use crate::domain::contact::Contact;
use crate::domain::error::{AppError, Result};
use crate::domain::product::NewProduct;
use crate::domain::settings::BusinessSettings;
use crate::interfaces::http::{add_log, LogEntry};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockApiConfig {
    pub port: u16,
    /// Phone numbers that always fail submission, as duplicates would.
    #[serde(default)]
    pub fail_phones: Vec<String>,
    /// When set to N > 0, every Nth write request fails with a 500.
    #[serde(default)]
    pub fail_every: Option<u32>,
    /// Artificial latency applied to every response.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            port: 4010,
            fail_phones: Vec::new(),
            fail_every: None,
            delay_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockApiStatus {
    pub running: bool,
    pub port: u16,
    pub url: String,
    pub contact_count: usize,
}

pub struct MockApiState {
    pub config: Arc<Mutex<MockApiConfig>>,
    pub server: Arc<Mutex<Option<ServerHandle>>>,
    pub config_path: PathBuf,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    contacts: Arc<Mutex<Vec<Contact>>>,
    settings: Arc<Mutex<BusinessSettings>>,
    write_count: Arc<AtomicU32>,
}

impl MockApiState {
    pub fn new(config_path: PathBuf, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        let config = match load_config_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                add_log(
                    &logs,
                    "ERROR",
                    "MockApi",
                    &format!("Failed to load mock API config: {}", e),
                );
                MockApiConfig::default()
            }
        };
        Self {
            config: Arc::new(Mutex::new(config)),
            server: Arc::new(Mutex::new(None)),
            config_path,
            logs,
            contacts: Arc::new(Mutex::new(Vec::new())),
            settings: Arc::new(Mutex::new(BusinessSettings::default())),
            write_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Decide whether this write request should fail, per the injection
    /// config. Returns the canned failure response when it should.
    fn inject_failure(&self, phone: Option<&str>) -> Option<HttpResponse> {
        let config = self.config.lock().unwrap().clone();

        if let Some(phone) = phone {
            if config.fail_phones.iter().any(|failing| failing == phone) {
                return Some(HttpResponse::UnprocessableEntity().json(json!({
                    "message": "Phone number already exists"
                })));
            }
        }

        if let Some(every) = config.fail_every.filter(|&every| every > 0) {
            let count = self.write_count.fetch_add(1, Ordering::SeqCst) + 1;
            if count % every == 0 {
                return Some(HttpResponse::InternalServerError().json(json!({
                    "message": "Temporary server error"
                })));
            }
        }

        None
    }

    async fn apply_delay(&self) {
        let delay_ms = self.config.lock().unwrap().delay_ms;
        if let Some(delay_ms) = delay_ms.filter(|&delay_ms| delay_ms > 0) {
            sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

pub fn load_config_from_path(path: &PathBuf) -> Result<MockApiConfig> {
    if !path.exists() {
        return Ok(MockApiConfig::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Internal(format!("Failed to read mock API config: {}", e)))?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Internal(format!("Failed to parse mock API config: {}", e)))
}

pub fn save_config(state: &MockApiState) -> Result<()> {
    let config = state.config.lock().unwrap();
    let serialized = serde_json::to_string_pretty(&*config)
        .map_err(|e| AppError::Internal(format!("Failed to serialize mock API config: {}", e)))?;
    fs::write(&state.config_path, serialized)
        .map_err(|e| AppError::Internal(format!("Failed to save mock API config: {}", e)))?;
    add_log(
        &state.logs,
        "INFO",
        "MockApi",
        &format!("Mock API config saved at {}", state.config_path.display()),
    );
    Ok(())
}

pub async fn start_mock_server(state: Arc<MockApiState>) -> Result<()> {
    let port = { state.config.lock().unwrap().port };
    let mut server_guard = state.server.lock().unwrap();
    if server_guard.is_some() {
        return Err(AppError::ValidationError(
            "Mock API is already running.".to_string(),
        ));
    }

    let server_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_state.clone()))
            .route("/auth/login", web::post().to(mock_login))
            .route("/contacts", web::post().to(mock_create_contact))
            .route("/contacts", web::get().to(mock_list_contacts))
            .route("/products", web::post().to(mock_create_product))
            .route("/messages", web::post().to(mock_send_message))
            .route("/settings", web::get().to(mock_get_settings))
            .route("/settings", web::put().to(mock_update_settings))
    })
    .bind(("127.0.0.1", port))
    .map_err(|e| AppError::Internal(format!("Failed to bind mock API: {}", e)))?
    .run();

    let handle = server.handle();
    *server_guard = Some(handle);
    tokio::spawn(server);

    add_log(
        &state.logs,
        "INFO",
        "MockApi",
        &format!("Mock API started on http://127.0.0.1:{}", port),
    );

    Ok(())
}

pub async fn stop_mock_server(state: Arc<MockApiState>) -> Result<()> {
    let handle = { state.server.lock().unwrap().take() };
    if let Some(handle) = handle {
        let graceful = timeout(Duration::from_secs(2), handle.stop(true)).await;
        if graceful.is_err() {
            handle.stop(false).await;
            add_log(
                &state.logs,
                "WARN",
                "MockApi",
                "Mock API forced stop after timeout",
            );
        } else {
            add_log(&state.logs, "INFO", "MockApi", "Mock API stopped");
        }
    } else {
        add_log(
            &state.logs,
            "INFO",
            "MockApi",
            "Mock API stop requested but already stopped",
        );
    }
    Ok(())
}

pub fn build_status(state: &MockApiState) -> MockApiStatus {
    let config = state.config.lock().unwrap();
    let running = state.server.lock().unwrap().is_some();
    MockApiStatus {
        running,
        port: config.port,
        url: format!("http://127.0.0.1:{}", config.port),
        contact_count: state.contacts.lock().unwrap().len(),
    }
}

#[derive(Debug, Deserialize)]
struct MockLoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct MockContactRequest {
    phone: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct MockMessageRequest {
    phone: String,
    #[allow(dead_code)]
    body: String,
}

#[derive(Debug, Deserialize)]
struct MockContactQuery {
    category: Option<String>,
}

async fn mock_login(
    data: web::Data<Arc<MockApiState>>,
    request: web::Json<MockLoginRequest>,
) -> HttpResponse {
    data.apply_delay().await;

    if request.password.is_empty() {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }));
    }

    add_log(
        &data.logs,
        "INFO",
        "MockApi",
        &format!("Login accepted for {}", request.email),
    );
    HttpResponse::Ok().json(json!({
        "token": Uuid::new_v4().to_string(),
        "businessName": "Sokoflow Demo Store"
    }))
}

async fn mock_create_contact(
    data: web::Data<Arc<MockApiState>>,
    request: web::Json<MockContactRequest>,
) -> HttpResponse {
    data.apply_delay().await;

    if let Some(failure) = data.inject_failure(Some(&request.phone)) {
        add_log(
            &data.logs,
            "WARN",
            "MockApi",
            &format!("Injected failure for contact {}", request.phone),
        );
        return failure;
    }

    let contact = Contact {
        id: Some(Uuid::new_v4().to_string()),
        phone: request.phone.clone(),
        category: request.category.clone(),
    };
    data.contacts.lock().unwrap().push(contact.clone());
    HttpResponse::Created().json(contact)
}

async fn mock_list_contacts(
    data: web::Data<Arc<MockApiState>>,
    query: web::Query<MockContactQuery>,
) -> HttpResponse {
    data.apply_delay().await;

    let contacts = data.contacts.lock().unwrap();
    let filtered: Vec<Contact> = contacts
        .iter()
        .filter(|contact| match &query.category {
            Some(category) => &contact.category == category,
            None => true,
        })
        .cloned()
        .collect();
    HttpResponse::Ok().json(filtered)
}

async fn mock_create_product(
    data: web::Data<Arc<MockApiState>>,
    product: web::Json<NewProduct>,
) -> HttpResponse {
    data.apply_delay().await;

    if let Some(failure) = data.inject_failure(None) {
        add_log(
            &data.logs,
            "WARN",
            "MockApi",
            &format!("Injected failure for product {}", product.name),
        );
        return failure;
    }

    HttpResponse::Created().json(product.into_inner())
}

async fn mock_send_message(
    data: web::Data<Arc<MockApiState>>,
    request: web::Json<MockMessageRequest>,
) -> HttpResponse {
    data.apply_delay().await;

    if let Some(failure) = data.inject_failure(Some(&request.phone)) {
        return failure;
    }

    HttpResponse::Ok().json(json!({ "message": "queued" }))
}

async fn mock_get_settings(data: web::Data<Arc<MockApiState>>) -> HttpResponse {
    data.apply_delay().await;
    let settings = data.settings.lock().unwrap().clone();
    HttpResponse::Ok().json(settings)
}

async fn mock_update_settings(
    data: web::Data<Arc<MockApiState>>,
    settings: web::Json<BusinessSettings>,
) -> HttpResponse {
    data.apply_delay().await;
    *data.settings.lock().unwrap() = settings.into_inner();
    HttpResponse::Ok().json(json!({ "message": "Settings saved" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(config: MockApiConfig) -> MockApiState {
        let state = MockApiState::new(
            std::env::temp_dir().join("sokoflow-mock-test.json"),
            Arc::new(Mutex::new(Vec::new())),
        );
        *state.config.lock().unwrap() = config;
        state
    }

    #[test]
    fn test_fail_phones_always_fail() {
        let state = state_with(MockApiConfig {
            fail_phones: vec!["233501234567".to_string()],
            ..MockApiConfig::default()
        });

        assert!(state.inject_failure(Some("233501234567")).is_some());
        assert!(state.inject_failure(Some("233509876543")).is_none());
    }

    #[test]
    fn test_fail_every_counts_write_requests() {
        let state = state_with(MockApiConfig {
            fail_every: Some(3),
            ..MockApiConfig::default()
        });

        let results: Vec<bool> = (0..6)
            .map(|_| state.inject_failure(Some("233509876543")).is_some())
            .collect();
        assert_eq!(results, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("sokoflow-mock-missing.json");
        let _ = fs::remove_file(&path);
        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.port, 4010);
        assert!(config.fail_phones.is_empty());
    }
}
