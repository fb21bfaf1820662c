use super::ApiClient;
use crate::domain::contact::Contact;
use crate::domain::error::{AppError, Result};
use crate::domain::product::NewProduct;
use crate::domain::session::{LoginResponse, SharedSession};
use crate::domain::settings::BusinessSettings;
use crate::infrastructure::config::AppConfig;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Thin reqwest wrapper around the remote platform API. Attaches the
/// session's bearer token when one is present and decodes server error
/// bodies defensively.
pub struct RestApiClient {
    client: reqwest::Client,
    base_url: String,
    session: SharedSession,
}

impl RestApiClient {
    pub fn new(config: &AppConfig, session: SharedSession) -> Result<Self> {
        // Reject a malformed base URL at construction, not on first request.
        config.api_base()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::ApiError(format!("Request failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(response);
        }
        Err(decode_error(response).await)
    }
}

/// Turn a non-2xx response into an [`AppError`], preferring the server's
/// own `message` field when the body carries one.
async fn decode_error(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|message| message.as_str())
                .map(|message| message.to_string())
        });

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return AppError::AuthError(message.unwrap_or_else(|| "Authentication required".to_string()));
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return AppError::NotFound(message.unwrap_or_else(|| "Resource not found".to_string()));
    }
    AppError::ApiError(message.unwrap_or_else(|| format!("Request failed with status {}", status)))
}

#[async_trait]
impl ApiClient for RestApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .send(self.client.post(self.endpoint("auth/login")).json(&body))
            .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse login response: {}", e)))
    }

    async fn submit_contact(&self, phone: &str, category: &str) -> Result<()> {
        let body = json!({ "phone": phone, "category": category });
        self.send(self.authorize(self.client.post(self.endpoint("contacts")).json(&body)))
            .await?;
        Ok(())
    }

    async fn list_contacts(&self, category: Option<&str>) -> Result<Vec<Contact>> {
        let mut request = self.client.get(self.endpoint("contacts"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        let response = self.send(self.authorize(request)).await?;

        response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse contact list: {}", e)))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<()> {
        self.send(self.authorize(self.client.post(self.endpoint("products")).json(product)))
            .await?;
        Ok(())
    }

    async fn send_message(&self, phone: &str, body: &str) -> Result<()> {
        let payload = json!({ "phone": phone, "body": body });
        self.send(self.authorize(self.client.post(self.endpoint("messages")).json(&payload)))
            .await?;
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<BusinessSettings> {
        let response = self
            .send(self.authorize(self.client.get(self.endpoint("settings"))))
            .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse settings: {}", e)))
    }

    async fn update_settings(&self, settings: &BusinessSettings) -> Result<()> {
        self.send(self.authorize(self.client.put(self.endpoint("settings")).json(settings)))
            .await?;
        Ok(())
    }
}
