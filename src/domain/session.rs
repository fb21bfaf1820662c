// ============================================================
// SESSION CONTEXT
// ============================================================
// Explicit, passed-in session state with read/write accessors.
// Nothing else in the crate holds auth state.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// What the remote API returns on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub business_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
struct SessionContext {
    token: Option<String>,
    account_email: Option<String>,
    session_id: Option<String>,
}

/// Shared handle to the session context. Cloning shares the same state.
#[derive(Debug, Default, Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionContext>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().unwrap().token.clone()
    }

    pub fn account_email(&self) -> Option<String> {
        self.inner.read().unwrap().account_email.clone()
    }

    pub fn session_id(&self) -> Option<String> {
        self.inner.read().unwrap().session_id.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap().token.is_some()
    }

    pub fn store(&self, token: String, account_email: String, session_id: String) {
        let mut context = self.inner.write().unwrap();
        context.token = Some(token);
        context.account_email = Some(account_email);
        context.session_id = Some(session_id);
    }

    pub fn clear(&self) {
        let mut context = self.inner.write().unwrap();
        *context = SessionContext::default();
    }
}
