//! Landing page greeting

use crate::session::decode_claims;

pub const ANONYMOUS_GREETING: &str = "Hello! Welcome to my App";

/// Greets the signed-in user by name when the token carries one.
pub fn greeting(token: Option<&str>) -> String {
    let username = token.and_then(|t| match decode_claims(t) {
        Ok(claims) => claims.username,
        Err(e) => {
            tracing::warn!("Invalid token: {}", e);
            None
        }
    });

    match username.filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome, {}", name),
        None => ANONYMOUS_GREETING.to_string(),
    }
}
