pub mod use_cases;

pub use use_cases::auth::AuthUseCase;
pub use use_cases::broadcast::BroadcastUseCase;
pub use use_cases::contact_import::ContactImportUseCase;
pub use use_cases::product_import::ProductImportUseCase;
pub use use_cases::settings::SettingsUseCase;
