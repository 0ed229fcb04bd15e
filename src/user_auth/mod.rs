//! User authentication: registration, login, JWT issue/verify, bearer gate

pub mod handlers;
pub mod middleware;
pub mod service;

pub use service::{AuthError, Claims, UserAuthService, issue_token, verify_token};
