//! Account creation form

use super::Navigate;
use crate::api::{AuthApi, Credentials};

#[derive(Debug, Default)]
pub struct RegisterView {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

impl RegisterView {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Create the account; success sends the user to sign in.
    pub async fn submit(&mut self, api: &dyn AuthApi) -> Option<Navigate> {
        self.error = None;

        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        match api.register(&credentials).await {
            Ok(()) => {
                tracing::info!(username = %self.username, "account created");
                Some(Navigate::Login)
            }
            Err(e) => {
                tracing::warn!(username = %self.username, "registration failed: {}", e);
                self.error = Some(e.user_message());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::login::fake::FakeAuth;

    #[tokio::test]
    async fn test_register_navigates_to_login() {
        let api = FakeAuth::default();
        let mut view = RegisterView::new("bo", "secret");

        assert_eq!(view.submit(&api).await, Some(Navigate::Login));
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn test_register_failure_message() {
        let api = FakeAuth::default();
        let mut view = RegisterView::default();

        assert_eq!(view.submit(&api).await, None);
        assert_eq!(view.error.as_deref(), Some("Register failed"));
        assert_eq!(api.seen.lock().unwrap()[0], Credentials::default());
    }
}
