//! Backend API
//!
//! Client for the external REST backend. The backend owns validation and
//! persistence; this module only speaks its contract:
//!
//! - `POST /login` -> `{ accessToken }`
//! - `POST /register`
//! - `GET /positions`, `POST /positions`
//! - `PUT /positions/:id`, `DELETE /positions/:id`

mod client;
mod dto;
mod error;

pub use client::{ApiClient, ApiClientConfig};
pub use dto::{Credentials, LoginResponse, Position, PositionInput};
pub use error::{ApiError, ApiResult, NETWORK_ERROR_MESSAGE};

use async_trait::async_trait;

/// Authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, credentials: &Credentials) -> ApiResult<String>;

    /// Create a new account
    async fn register(&self, credentials: &Credentials) -> ApiResult<()>;
}

/// Positions CRUD endpoints
#[async_trait]
pub trait PositionsApi: Send + Sync {
    async fn list_positions(&self) -> ApiResult<Vec<Position>>;

    async fn create_position(&self, input: &PositionInput) -> ApiResult<()>;

    async fn update_position(&self, id: i64, input: &PositionInput) -> ApiResult<()>;

    async fn delete_position(&self, id: i64) -> ApiResult<()>;
}
