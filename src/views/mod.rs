//! Page flows
//!
//! Each view is a small form-and-list state holder. A submit issues one
//! backend call and awaits it; failures are kept as a plain message for
//! the caller to render.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod positions;
pub mod register;

pub use dashboard::{DashboardCard, DashboardView, GUEST_NAME};
pub use landing::greeting;
pub use login::LoginView;
pub use positions::{FormMode, PositionsBoard};
pub use register::RegisterView;

/// Where a view sends the user next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    Landing,
    Login,
    Register,
    Dashboard,
}
