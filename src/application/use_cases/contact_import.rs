// ============================================================
// CONTACT IMPORT USE CASE
// ============================================================
// Sequential submission of validated rows with partial-failure
// aggregation. One request in flight at a time, no retries.

use std::sync::Arc;

use crate::domain::contact::ImportTarget;
use crate::domain::error::{AppError, Result};
use crate::domain::import::{CandidateRow, ImportOutcome};
use crate::infrastructure::api_client::ApiClient;
use tracing::{info, warn};
use uuid::Uuid;

pub struct ContactImportUseCase {
    api: Arc<dyn ApiClient>,
}

impl ContactImportUseCase {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Run one import: reject bad input before any network call, then
    /// submit each valid row in order. A row failure is counted and the
    /// loop continues; the run only fails outright when nothing succeeds.
    pub async fn execute(&self, rows: &[CandidateRow], category: &str) -> Result<ImportOutcome> {
        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter a category name".to_string(),
            ));
        }

        let targets: Vec<ImportTarget> = rows
            .iter()
            .filter(|row| row.is_valid)
            .map(|row| ImportTarget::new(&row.normalized_phone, category))
            .collect();
        if targets.is_empty() {
            return Err(AppError::ValidationError(
                "No valid contacts to import".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            total = targets.len(),
            category,
            "Starting contact import"
        );

        let mut outcome = ImportOutcome::default();
        for target in &targets {
            match self.api.submit_contact(&target.phone, &target.category).await {
                Ok(()) => outcome.success_count += 1,
                Err(e) => {
                    warn!(%run_id, phone = %target.phone, error = %e, "Contact submission failed");
                    outcome.fail_count += 1;
                }
            }
        }

        if outcome.success_count == 0 {
            return Err(AppError::ApiError("Failed to import contacts".to_string()));
        }

        info!(
            %run_id,
            success = outcome.success_count,
            failed = outcome.fail_count,
            "Contact import finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::Contact;
    use crate::domain::import::parse_contact_lines;
    use crate::domain::product::NewProduct;
    use crate::domain::session::LoginResponse;
    use crate::domain::settings::BusinessSettings;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// ApiClient whose submit_contact outcomes follow a script; records
    /// every submission it receives.
    struct ScriptedApiClient {
        outcomes: Mutex<VecDeque<bool>>,
        submissions: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedApiClient {
        fn new(outcomes: &[bool]) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.iter().copied().collect()),
                submissions: Mutex::new(Vec::new()),
            }
        }

        fn submissions(&self) -> Vec<(String, String)> {
            self.submissions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiClient for ScriptedApiClient {
        async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn submit_contact(&self, phone: &str, category: &str) -> Result<()> {
            self.submissions
                .lock()
                .unwrap()
                .push((phone.to_string(), category.to_string()));
            let ok = self.outcomes.lock().unwrap().pop_front().unwrap_or(true);
            if ok {
                Ok(())
            } else {
                Err(AppError::ApiError("Phone number already exists".to_string()))
            }
        }

        async fn list_contacts(&self, _category: Option<&str>) -> Result<Vec<Contact>> {
            Ok(Vec::new())
        }

        async fn create_product(&self, _product: &NewProduct) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn send_message(&self, _phone: &str, _body: &str) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn fetch_settings(&self) -> Result<BusinessSettings> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn update_settings(&self, _settings: &BusinessSettings) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }
    }

    fn use_case(outcomes: &[bool]) -> (ContactImportUseCase, Arc<ScriptedApiClient>) {
        let api = Arc::new(ScriptedApiClient::new(outcomes));
        (ContactImportUseCase::new(api.clone()), api)
    }

    #[tokio::test]
    async fn test_blank_category_rejected_before_any_call() {
        let rows = parse_contact_lines("233501234567\n233509876543\n233241112223").rows;
        let (import, api) = use_case(&[]);

        let err = import.execute(&rows, "   ").await.unwrap_err();
        assert_eq!(err.message(), "Please enter a category name");
        assert!(api.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_no_valid_rows_rejected_before_any_call() {
        let rows = parse_contact_lines("abc\n12345").rows;
        let (import, api) = use_case(&[]);

        let err = import.execute(&rows, "Customers").await.unwrap_err();
        assert_eq!(err.message(), "No valid contacts to import");
        assert!(api.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_still_succeeds() {
        let rows = parse_contact_lines("233501234567\n233509876543").rows;
        let (import, _) = use_case(&[true, false]);

        let outcome = import.execute(&rows, "Test").await.unwrap();
        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.fail_count, 1);
        assert_eq!(outcome.message(), "Successfully imported 1 contact. 1 failed.");
    }

    #[tokio::test]
    async fn test_all_failures_is_an_error() {
        let rows = parse_contact_lines("233501234567\n233509876543").rows;
        let (import, api) = use_case(&[false, false]);

        let err = import.execute(&rows, "Test").await.unwrap_err();
        assert_eq!(err.message(), "Failed to import contacts");
        // Both rows were still attempted; one failure never aborts the loop.
        assert_eq!(api.submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_submissions_follow_input_order() {
        let rows = parse_contact_lines("233501234567\nabc\n233509876543\n12345").rows;
        let (import, api) = use_case(&[]);

        let outcome = import.execute(&rows, " Suppliers ").await.unwrap();
        assert_eq!(outcome.success_count, 2);

        // Invalid rows are filtered out, order preserved, category trimmed.
        assert_eq!(
            api.submissions(),
            vec![
                ("233501234567".to_string(), "Suppliers".to_string()),
                ("233509876543".to_string(), "Suppliers".to_string()),
            ]
        );
    }
}
