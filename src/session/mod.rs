//! Session handling
//!
//! - **store**: persists the access token between runs
//! - **token**: unverified decoding of the token's claims for display

mod store;
mod token;

pub use store::{SessionError, SessionStore};
pub use token::{decode_claims, token_preview, Subject, TokenClaims, TokenError, PREVIEW_LEN};

#[cfg(test)]
pub(crate) use token::encode_test_token;
