//! # Portal
//!
//! Terminal client for the positions/auth REST backend.
//!
//! ## Features
//!
//! - **Authentication**: sign in and register against `/login` and `/register`
//! - **Session**: the access token is kept on disk and its claims decoded for display
//! - **Positions**: list, create, update and delete job positions
//!
//! ## Modules
//!
//! - [`api`]: REST client for the backend
//! - [`session`]: token storage and unverified claim decoding
//! - [`views`]: form-and-list flows driven by the CLI
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portal::api::{ApiClient, ApiClientConfig};
//! use portal::views::PositionsBoard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ApiClientConfig::default())?.with_token("eyJ...");
//!
//!     let mut board = PositionsBoard::new(client);
//!     board.refresh().await;
//!
//!     for position in &board.positions {
//!         println!("{} {}", position.position_code, position.position_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod session;
pub mod views;

pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiResult, AuthApi, Credentials, Position,
    PositionInput, PositionsApi,
};

pub use session::{decode_claims, token_preview, SessionError, SessionStore, TokenClaims, TokenError};

pub use views::{DashboardView, FormMode, LoginView, Navigate, PositionsBoard, RegisterView};

pub use config::{
    ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig, generate_default_config,
};
