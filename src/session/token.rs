//! Bearer token decoding
//!
//! Reads the claims out of a JWT payload for display. The signature is
//! never checked; nothing here may be used to make access decisions.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Characters of the token shown before it is cut off
pub const PREVIEW_LEN: usize = 40;

/// Claims the backend puts in its access tokens
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<Subject>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// `sub` is numeric for this backend but strings are common elsewhere
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Subject {
    Id(i64),
    Name(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Id(id) => write!(f, "{}", id),
            Subject::Name(name) => f.write_str(name),
        }
    }
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Tokens without `exp` never report as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map(|exp| exp <= now).unwrap_or(false)
    }
}

/// Errors from decoding a token payload
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token is not a JWT")]
    Malformed,

    #[error("Token is not valid base64url: {0}")]
    Encoding(String),

    #[error("Token payload is not valid JSON: {0}")]
    Payload(String),

    #[error("Token could not be decoded: {0}")]
    Other(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidToken => TokenError::Malformed,
            ErrorKind::Base64(e) => TokenError::Encoding(e.to_string()),
            ErrorKind::Utf8(e) => TokenError::Encoding(e.to_string()),
            ErrorKind::Json(e) => TokenError::Payload(e.to_string()),
            _ => TokenError::Other(err),
        }
    }
}

/// Decode the claims of `token` without verifying it. Expired tokens
/// still decode; use [`TokenClaims::is_expired`] to tell.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<TokenClaims>(token.trim(), &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// The whole token, or its first [`PREVIEW_LEN`] characters followed by
/// `...`. The ellipsis is always added when not showing the full token.
pub fn token_preview(token: &str, full: bool) -> String {
    if full {
        return token.to_string();
    }
    let head: String = token.chars().take(PREVIEW_LEN).collect();
    format!("{}...", head)
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(&Header::default(), claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    /// base64url of `{"alg":"HS256","typ":"JWT"}`
    const HS256_HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

    #[test]
    fn test_decode_backend_claims() {
        let token = encode_test_token(&json!({
            "sub": 12,
            "username": "ana",
            "role": "admin",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, Some(Subject::Id(12)));
        assert_eq!(claims.username.as_deref(), Some("ana"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(
            claims.expires_at(),
            Some(Utc.timestamp_opt(1_700_003_600, 0).unwrap())
        );
        assert!(claims.is_expired(Utc::now()));
    }

    #[test]
    fn test_string_subject_and_missing_fields() {
        let token = encode_test_token(&json!({"sub": "user-1"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_ref().unwrap().to_string(), "user-1");
        assert_eq!(claims.username, None);
        assert!(!claims.is_expired(Utc::now()));
    }

    #[test]
    fn test_signature_is_not_checked() {
        let token = encode_test_token(&json!({"username": "bo"}));
        let (unsigned, _) = token.rsplit_once('.').unwrap();
        let forged = format!("{}.not-the-signature", unsigned);

        assert_eq!(decode_claims(&forged).unwrap().username.as_deref(), Some("bo"));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(decode_claims("opaque"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a.%%%.c"), Err(TokenError::Encoding(_))));

        // payload is base64url("hello")
        let not_json = format!("{}.aGVsbG8.c", HS256_HEADER);
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Payload(_))));
    }

    #[test]
    fn test_expiry() {
        let claims = TokenClaims {
            exp: Some(100),
            ..Default::default()
        };
        assert!(claims.is_expired(Utc.timestamp_opt(100, 0).unwrap()));
        assert!(!claims.is_expired(Utc.timestamp_opt(99, 0).unwrap()));
    }

    #[test]
    fn test_token_preview() {
        let long = "x".repeat(50);
        assert_eq!(token_preview(&long, false), format!("{}...", "x".repeat(40)));
        assert_eq!(token_preview(&long, true), long);
        assert_eq!(token_preview("short", false), "short...");
        assert_eq!(token_preview(&"y".repeat(40), false), format!("{}...", "y".repeat(40)));
    }
}
