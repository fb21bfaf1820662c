use std::sync::Arc;

use crate::domain::error::Result;
use crate::domain::session::SharedSession;
use crate::infrastructure::api_client::ApiClient;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

pub struct AuthUseCase {
    api: Arc<dyn ApiClient>,
    session: SharedSession,
}

impl AuthUseCase {
    pub fn new(api: Arc<dyn ApiClient>, session: SharedSession) -> Self {
        Self { api, session }
    }

    /// Exchange credentials for a bearer token and store it in the
    /// session context.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionInfo> {
        request.validate()?;

        let response = self.api.login(&request.email, &request.password).await?;
        let session_id = Uuid::new_v4().to_string();
        self.session
            .store(response.token, request.email.clone(), session_id.clone());

        info!(session_id = %session_id, email = %request.email, "Logged in");
        Ok(SessionInfo {
            authenticated: true,
            account_email: Some(request.email.clone()),
            business_name: response.business_name,
        })
    }

    pub fn logout(&self) {
        if let Some(session_id) = self.session.session_id() {
            info!(session_id = %session_id, "Logged out");
        }
        self.session.clear();
    }

    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            authenticated: self.session.is_authenticated(),
            account_email: self.session.account_email(),
            business_name: None,
        }
    }
}
