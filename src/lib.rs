//! Order-Desk - Order Management Backend
//!
//! A thin HTTP/JSON layer over PostgreSQL for customer orders, plus JWT
//! bearer-token user authentication.
//!
//! # Modules
//!
//! - [`config`] - YAML application configuration
//! - [`logging`] - Rolling-file + stdout tracing setup
//! - [`db`] - PostgreSQL connection pool management
//! - [`user_auth`] - Registration, login, JWT issue/verify, bearer middleware
//! - [`orders`] - Order store: upsert-by-iqama, patch, search, pagination, delete
//! - [`gateway`] - Axum router, shared state, response envelope, OpenAPI docs

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod orders;
pub mod user_auth;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use orders::{Order, OrderPage, OrderStore, StoreError};
pub use user_auth::{Claims, UserAuthService};
