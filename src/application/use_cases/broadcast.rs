// ============================================================
// BULK MESSAGE USE CASE
// ============================================================

use std::sync::Arc;

use crate::domain::error::{AppError, Result};
use crate::domain::message::{BroadcastReport, MAX_MESSAGE_CHARS};
use crate::infrastructure::api_client::ApiClient;
use tracing::{info, warn};
use uuid::Uuid;

pub struct BroadcastUseCase {
    api: Arc<dyn ApiClient>,
}

impl BroadcastUseCase {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Send one message body to every contact in a category, one send at
    /// a time, continuing past individual failures.
    pub async fn execute(&self, category: &str, body: &str) -> Result<BroadcastReport> {
        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::ValidationError(
                "Please select a category".to_string(),
            ));
        }

        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter a message".to_string(),
            ));
        }
        if body.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::ValidationError(format!(
                "Message is longer than {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let contacts = self.api.list_contacts(Some(category)).await?;
        if contacts.is_empty() {
            return Err(AppError::ValidationError(
                "No contacts in this category".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        info!(%run_id, category, recipients = contacts.len(), "Starting broadcast");

        let mut report = BroadcastReport::default();
        for contact in &contacts {
            match self.api.send_message(&contact.phone, body).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(%run_id, phone = %contact.phone, error = %e, "Message send failed");
                    report.failed += 1;
                }
            }
        }

        if report.delivered == 0 {
            return Err(AppError::ApiError("Failed to send messages".to_string()));
        }

        info!(%run_id, delivered = report.delivered, failed = report.failed, "Broadcast finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::Contact;
    use crate::domain::product::NewProduct;
    use crate::domain::session::LoginResponse;
    use crate::domain::settings::BusinessSettings;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct BroadcastApiClient {
        contacts: Vec<Contact>,
        fail_phones: Vec<String>,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl BroadcastApiClient {
        fn new(phones: &[&str], fail_phones: &[&str]) -> Self {
            Self {
                contacts: phones
                    .iter()
                    .map(|phone| Contact {
                        id: None,
                        phone: phone.to_string(),
                        category: "Customers".to_string(),
                    })
                    .collect(),
                fail_phones: fail_phones.iter().map(|phone| phone.to_string()).collect(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApiClient for BroadcastApiClient {
        async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn submit_contact(&self, _phone: &str, _category: &str) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn list_contacts(&self, _category: Option<&str>) -> Result<Vec<Contact>> {
            Ok(self.contacts.clone())
        }

        async fn create_product(&self, _product: &NewProduct) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn send_message(&self, phone: &str, body: &str) -> Result<()> {
            if self.fail_phones.iter().any(|failing| failing == phone) {
                return Err(AppError::ApiError("Gateway rejected number".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((phone.to_string(), body.to_string()));
            Ok(())
        }

        async fn fetch_settings(&self) -> Result<BusinessSettings> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn update_settings(&self, _settings: &BusinessSettings) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }
    }

    #[tokio::test]
    async fn test_broadcast_continues_past_failures() {
        let api = Arc::new(BroadcastApiClient::new(
            &["233501234567", "233509876543", "233241112223"],
            &["233509876543"],
        ));
        let broadcast = BroadcastUseCase::new(api.clone());

        let report = broadcast.execute("Customers", "Fresh stock in!").await.unwrap();
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.message(), "Message sent to 2 contacts. 1 failed.");
        assert_eq!(api.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let api = Arc::new(BroadcastApiClient::new(&["233501234567"], &[]));
        let broadcast = BroadcastUseCase::new(api);

        let err = broadcast.execute("Customers", "   ").await.unwrap_err();
        assert_eq!(err.message(), "Please enter a message");
    }

    #[tokio::test]
    async fn test_overlong_body_rejected() {
        let api = Arc::new(BroadcastApiClient::new(&["233501234567"], &[]));
        let broadcast = BroadcastUseCase::new(api);

        let body = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(broadcast.execute("Customers", &body).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_category_has_no_recipients() {
        let api = Arc::new(BroadcastApiClient::new(&[], &[]));
        let broadcast = BroadcastUseCase::new(api);

        let err = broadcast.execute("Customers", "Hello").await.unwrap_err();
        assert_eq!(err.message(), "No contacts in this category");
    }
}
