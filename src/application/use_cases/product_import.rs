// ============================================================
// PRODUCT IMPORT USE CASE
// ============================================================
// CSV upload -> per-row validation -> category inference ->
// sequential submission with partial-failure aggregation

use std::sync::Arc;

use crate::domain::error::{AppError, Result};
use crate::domain::product::{NewProduct, ProductImportReport, ProductRecord, RowError};
use crate::infrastructure::api_client::ApiClient;
use crate::infrastructure::csv::ProductCsvParser;
use crate::infrastructure::uploads::decode_upload;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

/// Keyword rules for inferring a category from a product name.
/// First match wins; everything else lands in "General".
static CATEGORY_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\b(phone|laptop|charger|cable|tv|radio|speaker|earbuds)\b").unwrap(),
            "Electronics",
        ),
        (
            Regex::new(r"(?i)\b(shirt|dress|trousers?|shoes?|sandals?|fabric|scarf)\b").unwrap(),
            "Clothing",
        ),
        (
            Regex::new(r"(?i)\b(rice|oil|sugar|flour|milk|soap|tomato(es)?|maize|beans)\b").unwrap(),
            "Groceries",
        ),
        (
            Regex::new(r"(?i)\b(pens?|pencils?|notebooks?|paper|staplers?|envelopes?)\b").unwrap(),
            "Stationery",
        ),
    ]
});

pub fn infer_category(name: &str) -> String {
    CATEGORY_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(name))
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| "General".to_string())
}

pub struct ProductImportUseCase {
    api: Arc<dyn ApiClient>,
}

impl ProductImportUseCase {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Import a product CSV upload end to end. Invalid rows are reported
    /// and skipped; valid rows are submitted one at a time and a failed
    /// submission never aborts the rest.
    pub async fn execute(&self, file_name: &str, bytes: &[u8]) -> Result<ProductImportReport> {
        let content = decode_upload(file_name, bytes)?;

        let delimiter = ProductCsvParser::detect_delimiter(&content);
        let records = ProductCsvParser::new()
            .with_delimiter(delimiter)
            .parse_content(&content)?;
        if records.is_empty() {
            return Err(AppError::ValidationError(
                "No products to import".to_string(),
            ));
        }

        let mut products = Vec::new();
        let mut report = ProductImportReport::default();
        for record in &records {
            match validate_record(record) {
                Ok(product) => products.push(product),
                Err(reason) => {
                    report.skipped += 1;
                    report.row_errors.push(RowError {
                        line: record.line,
                        reason,
                    });
                }
            }
        }
        if products.is_empty() {
            return Err(AppError::ValidationError(
                "No valid products to import".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        info!(%run_id, total = products.len(), skipped = report.skipped, "Starting product import");

        for product in &products {
            match self.api.create_product(product).await {
                Ok(()) => report.created += 1,
                Err(e) => {
                    warn!(%run_id, product = %product.name, error = %e, "Product submission failed");
                    report.failed += 1;
                }
            }
        }

        if report.created == 0 {
            return Err(AppError::ApiError("Failed to import products".to_string()));
        }

        info!(%run_id, created = report.created, failed = report.failed, "Product import finished");
        Ok(report)
    }
}

fn validate_record(record: &ProductRecord) -> std::result::Result<NewProduct, String> {
    if record.name.is_empty() {
        return Err("Product name is missing".to_string());
    }

    let price: f64 = record
        .price
        .replace(',', "")
        .parse()
        .map_err(|_| format!("Invalid price '{}'", record.price))?;
    if price < 0.0 {
        return Err(format!("Invalid price '{}'", record.price));
    }

    let quantity: u32 = record
        .quantity
        .parse()
        .map_err(|_| format!("Invalid quantity '{}'", record.quantity))?;

    let category = record
        .category
        .clone()
        .unwrap_or_else(|| infer_category(&record.name));

    Ok(NewProduct {
        name: record.name.clone(),
        price,
        quantity,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::Contact;
    use crate::domain::session::LoginResponse;
    use crate::domain::settings::BusinessSettings;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingApiClient {
        fail_names: Vec<String>,
        created: Mutex<Vec<NewProduct>>,
    }

    impl RecordingApiClient {
        fn new(fail_names: &[&str]) -> Self {
            Self {
                fail_names: fail_names.iter().map(|name| name.to_string()).collect(),
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApiClient for RecordingApiClient {
        async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn submit_contact(&self, _phone: &str, _category: &str) -> Result<()> {
            Err(AppError::Internal("not scripted".to_string()))
        }

        async fn list_contacts(&self, _category: Option<&str>) -> Result<Vec<Contact>> {
            Ok(Vec::new())
        }

        async fn create_product(&self, product: &NewProduct) -> Result<()> {
            if self.fail_names.contains(&product.name) {
                return Err(AppError::ApiError("Product already exists".to_string()));
            }
            self.created.lock().unwrap().push(product.clone());
            Ok(())
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

    const PRODUCTS_CSV: &str = "\
name,price,quantity,category
Rice 5kg,120.00,40,
Samsung charger,35,12,Electronics
,10,5,
Notebook A5,abc,3,";

    #[test]
    fn test_infer_category_keyword_rules() {
        assert_eq!(infer_category("Samsung phone charger"), "Electronics");
        assert_eq!(infer_category("Cotton shirt (L)"), "Clothing");
        assert_eq!(infer_category("Rice 5kg"), "Groceries");
        assert_eq!(infer_category("Notebook A5"), "Stationery");
        assert_eq!(infer_category("Garden hose"), "General");
    }

    #[test]
    fn test_infer_category_is_case_insensitive() {
        assert_eq!(infer_category("LAPTOP sleeve"), "Electronics");
    }

    #[tokio::test]
    async fn test_import_skips_invalid_rows_and_infers_categories() {
        let api = Arc::new(RecordingApiClient::new(&[]));
        let import = ProductImportUseCase::new(api.clone());

        let report = import
            .execute("products.csv", PRODUCTS_CSV.as_bytes())
            .await
            .unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.row_errors.len(), 2);
        assert_eq!(report.row_errors[0].line, 4);
        assert_eq!(report.row_errors[0].reason, "Product name is missing");
        assert_eq!(report.row_errors[1].reason, "Invalid price 'abc'");

        let created = api.created.lock().unwrap();
        assert_eq!(created[0].category, "Groceries"); // inferred
        assert_eq!(created[1].category, "Electronics"); // from the file
    }

    #[tokio::test]
    async fn test_submission_failures_are_counted_not_fatal() {
        let api = Arc::new(RecordingApiClient::new(&["Rice 5kg"]));
        let import = ProductImportUseCase::new(api);

        let report = import
            .execute("products.csv", PRODUCTS_CSV.as_bytes())
            .await
            .unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.message(), "Imported 1 product. 1 failed. 2 skipped.");
    }

    #[tokio::test]
    async fn test_rejects_wrong_extension() {
        let api = Arc::new(RecordingApiClient::new(&[]));
        let import = ProductImportUseCase::new(api);

        let err = import
            .execute("products.xlsx", PRODUCTS_CSV.as_bytes())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Please upload a CSV or TXT file");
    }

    #[tokio::test]
    async fn test_rejects_file_with_no_valid_rows() {
        let api = Arc::new(RecordingApiClient::new(&[]));
        let import = ProductImportUseCase::new(api);

        let err = import
            .execute("products.csv", b"name,price,quantity\n,abc,xyz")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "No valid products to import");
    }
}
