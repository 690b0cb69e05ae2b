//! Signed-in landing view: who you are and your bearer token

use crate::session::{decode_claims, token_preview, TokenClaims};

pub const GUEST_NAME: &str = "Guest";

/// A summary tile on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
    pub title: &'static str,
    pub description: &'static str,
}

const CARDS: [DashboardCard; 3] = [
    DashboardCard {
        title: "Overview",
        description: "Quick glance at your stats.",
    },
    DashboardCard {
        title: "Reports",
        description: "Detailed insights and analytics.",
    },
    DashboardCard {
        title: "Settings",
        description: "Manage your preferences.",
    },
];

#[derive(Debug, Clone)]
pub struct DashboardView {
    token: Option<String>,
    claims: Option<TokenClaims>,
    pub show_full: bool,
}

impl DashboardView {
    pub fn new(token: Option<String>) -> Self {
        let claims = token.as_deref().and_then(|t| match decode_claims(t) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::warn!("Token decoding failed: {}", e);
                None
            }
        });

        Self {
            token,
            claims,
            show_full: false,
        }
    }

    /// Name from the token, or [`GUEST_NAME`]
    pub fn username(&self) -> &str {
        self.claims
            .as_ref()
            .and_then(|c| c.username.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(GUEST_NAME)
    }

    pub fn heading(&self) -> String {
        format!("Welcome, {}", self.username())
    }

    pub fn claims(&self) -> Option<&TokenClaims> {
        self.claims.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn toggle_full(&mut self) {
        self.show_full = !self.show_full;
    }

    /// Token as currently displayed; `None` when signed out
    pub fn token_display(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(|t| token_preview(t, self.show_full))
    }

    pub fn cards(&self) -> &'static [DashboardCard] {
        &CARDS
    }
}
