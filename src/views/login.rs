//! Sign-in form

use super::Navigate;
use crate::api::{AuthApi, Credentials};
use crate::session::SessionStore;

#[derive(Debug, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginView {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Sign in and keep the token. Returns the next page on success; on
    /// failure the message is left in `error` and `None` is returned.
    pub async fn submit(&mut self, api: &dyn AuthApi, store: &SessionStore) -> Option<Navigate> {
        self.error = None;

        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        let token = match api.login(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(username = %self.username, "login failed: {}", e);
                self.error = Some(e.user_message());
                return None;
            }
        };

        if let Err(e) = store.save_token(&token) {
            tracing::warn!("could not persist session: {}", e);
            self.error = Some(e.to_string());
            return None;
        }

        tracing::info!(username = %self.username, "signed in");
        Some(Navigate::Dashboard)
    }
}
