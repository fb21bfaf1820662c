use crate::application::use_cases::auth::LoginRequest;
use crate::domain::error::AppError;
use crate::domain::import::{
    parse_contact_lines, ImportPhase, CONTACT_TEMPLATE, CONTACT_TEMPLATE_FILE_NAME,
};
use crate::domain::message::BroadcastRequest;
use crate::domain::settings::BusinessSettings;
use crate::infrastructure::uploads::decode_upload;
use crate::interfaces::mock_server::{
    build_status as build_mock_status, save_config as save_mock_config, start_mock_server,
    stop_mock_server, MockApiConfig,
};
use crate::interfaces::state::AppState;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, put, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub state: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub category: String,
}

#[derive(Deserialize)]
pub struct ContactsQuery {
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeResponse {
    message: String,
    success_count: usize,
    fail_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportStatusResponse {
    phase: ImportPhase,
    valid_count: usize,
    invalid_count: usize,
}

/// Map an error to the UI payload `{"message": ...}` with a status code
/// matching its kind.
fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "message": err.message() });
    match err {
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        AppError::AuthError(_) => HttpResponse::Unauthorized().json(body),
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ParseError(_) => HttpResponse::UnprocessableEntity().json(body),
        AppError::ApiError(_) => HttpResponse::BadGateway().json(body),
        AppError::Internal(_) | AppError::IoError(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Failures past the input-rejection boundary of an import run collapse
/// to a generic message; only the aggregated all-rows-failed outcome
/// keeps its own wording.
fn import_error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::ApiError(message) => {
            HttpResponse::BadGateway().json(json!({ "message": message }))
        }
        _ => HttpResponse::InternalServerError()
            .json(json!({ "message": "An error occurred during import" })),
    }
}

#[post("/auth/login")]
async fn login(data: web::Data<HttpState>, request: web::Json<LoginRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Auth",
        &format!("Login attempt for {}", request.email),
    );

    match data.state.auth_use_case.login(&request).await {
        Ok(info) => HttpResponse::Ok().json(info),
        Err(e) => {
            add_log(&data.logs, "ERROR", "Auth", &format!("Login failed: {}", e));
            error_response(&e)
        }
    }
}

#[post("/auth/logout")]
async fn logout(data: web::Data<HttpState>) -> impl Responder {
    data.state.auth_use_case.logout();
    add_log(&data.logs, "INFO", "Auth", "Logged out");
    HttpResponse::Ok().json(json!({ "message": "Logged out" }))
}

#[get("/session")]
async fn session(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.state.auth_use_case.session_info())
}

#[post("/contacts/import/preview")]
async fn preview_contacts(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    {
        let mut flow = data.state.import_flow.lock().unwrap();
        flow.select_file();
    }
    add_log(
        &data.logs,
        "INFO",
        "ContactImport",
        &format!("Validating upload '{}'", query.file_name),
    );

    let text = match decode_upload(&query.file_name, &body) {
        Ok(text) => text,
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "ContactImport",
                &format!("Upload rejected: {}", e),
            );
            return error_response(&e);
        }
    };

    let preview = parse_contact_lines(&text);
    add_log(
        &data.logs,
        "INFO",
        "ContactImport",
        &format!(
            "Parsed {} rows ({} valid, {} invalid)",
            preview.rows.len(),
            preview.valid_count,
            preview.invalid_count
        ),
    );

    let response = preview.clone();
    let mut flow = data.state.import_flow.lock().unwrap();
    if let Err(e) = flow.preview_ready(preview) {
        add_log(
            &data.logs,
            "ERROR",
            "ContactImport",
            &format!("Preview discarded: {}", e),
        );
        return error_response(&e);
    }
    HttpResponse::Ok().json(response)
}

#[post("/contacts/import")]
async fn import_contacts(
    data: web::Data<HttpState>,
    request: web::Json<ImportRequest>,
) -> impl Responder {
    let rows = {
        let mut flow = data.state.import_flow.lock().unwrap();
        match flow.begin_import() {
            Ok(rows) => rows,
            Err(e) => {
                add_log(
                    &data.logs,
                    "WARN",
                    "ContactImport",
                    &format!("Import rejected: {}", e),
                );
                return error_response(&e);
            }
        }
    };

    let result = data
        .state
        .contact_import_use_case
        .execute(&rows, &request.category)
        .await;

    let mut flow = data.state.import_flow.lock().unwrap();
    match result {
        Ok(outcome) => {
            flow.finish(true);
            let message = outcome.message();
            add_log(&data.logs, "INFO", "ContactImport", &message);
            HttpResponse::Ok().json(OutcomeResponse {
                message,
                success_count: outcome.success_count,
                fail_count: outcome.fail_count,
            })
        }
        Err(e @ AppError::ValidationError(_)) => {
            // Rejected before any submission; the preview survives.
            flow.reject_import();
            add_log(
                &data.logs,
                "WARN",
                "ContactImport",
                &format!("Import rejected: {}", e),
            );
            error_response(&e)
        }
        Err(e) => {
            flow.finish(false);
            add_log(
                &data.logs,
                "ERROR",
                "ContactImport",
                &format!("Import failed: {}", e),
            );
            import_error_response(&e)
        }
    }
}

#[get("/contacts/import/status")]
async fn import_status(data: web::Data<HttpState>) -> impl Responder {
    let flow = data.state.import_flow.lock().unwrap();
    let (valid_count, invalid_count) = flow
        .preview()
        .map(|preview| (preview.valid_count, preview.invalid_count))
        .unwrap_or((0, 0));
    HttpResponse::Ok().json(ImportStatusResponse {
        phase: flow.phase(),
        valid_count,
        invalid_count,
    })
}

#[get("/contacts/import/template")]
async fn import_template() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", CONTACT_TEMPLATE_FILE_NAME),
        ))
        .body(CONTACT_TEMPLATE)
}

#[get("/contacts")]
async fn list_contacts(
    data: web::Data<HttpState>,
    query: web::Query<ContactsQuery>,
) -> impl Responder {
    match data
        .state
        .api_client
        .list_contacts(query.category.as_deref())
        .await
    {
        Ok(contacts) => HttpResponse::Ok().json(contacts),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Contacts",
                &format!("Failed to list contacts: {}", e),
            );
            error_response(&e)
        }
    }
}

#[post("/products/import")]
async fn import_products(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "ProductImport",
        &format!("Importing product file '{}'", query.file_name),
    );

    match data
        .state
        .product_import_use_case
        .execute(&query.file_name, &body)
        .await
    {
        Ok(report) => {
            add_log(&data.logs, "INFO", "ProductImport", &report.message());
            HttpResponse::Ok().json(report)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "ProductImport",
                &format!("Product import failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[post("/messages/broadcast")]
async fn broadcast(
    data: web::Data<HttpState>,
    request: web::Json<BroadcastRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Broadcast",
        &format!("Broadcast requested for category '{}'", request.category),
    );

    match data
        .state
        .broadcast_use_case
        .execute(&request.category, &request.body)
        .await
    {
        Ok(report) => {
            add_log(&data.logs, "INFO", "Broadcast", &report.message());
            HttpResponse::Ok().json(report)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Broadcast",
                &format!("Broadcast failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/settings")]
async fn get_settings(data: web::Data<HttpState>) -> impl Responder {
    match data.state.settings_use_case.get().await {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => error_response(&e),
    }
}

#[put("/settings")]
async fn put_settings(
    data: web::Data<HttpState>,
    settings: web::Json<BusinessSettings>,
) -> impl Responder {
    match data.state.settings_use_case.update(&settings).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Settings",
                &format!("Settings update failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/mock/status")]
async fn mock_status(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(build_mock_status(&data.state.mock_server))
}

#[post("/mock/start")]
async fn mock_start(data: web::Data<HttpState>) -> impl Responder {
    match start_mock_server(data.state.mock_server.clone()).await {
        Ok(()) => HttpResponse::Ok().json(build_mock_status(&data.state.mock_server)),
        Err(e) => error_response(&e),
    }
}

#[post("/mock/stop")]
async fn mock_stop(data: web::Data<HttpState>) -> impl Responder {
    match stop_mock_server(data.state.mock_server.clone()).await {
        Ok(()) => HttpResponse::Ok().json(build_mock_status(&data.state.mock_server)),
        Err(e) => error_response(&e),
    }
}

#[put("/mock/config")]
async fn mock_config(
    data: web::Data<HttpState>,
    config: web::Json<MockApiConfig>,
) -> impl Responder {
    {
        let mut current = data.state.mock_server.config.lock().unwrap();
        *current = config.into_inner();
    }
    match save_mock_config(&data.state.mock_server) {
        Ok(()) => HttpResponse::Ok().json(build_mock_status(&data.state.mock_server)),
        Err(e) => error_response(&e),
    }
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(login)
            .service(logout)
            .service(session)
            .service(preview_contacts)
            .service(import_contacts)
            .service(import_status)
            .service(import_template)
            .service(list_contacts)
            .service(import_products)
            .service(broadcast)
            .service(get_settings)
            .service(put_settings)
            .service(get_logs)
            .service(mock_status)
            .service(mock_start)
            .service(mock_stop)
            .service(mock_config),
    );
}

pub fn start_server(
    state: Arc<AppState>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    host: &str,
    port: u16,
) -> std::io::Result<Server> {
    let data = web::Data::new(HttpState { state, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(data.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
