use std::sync::Arc;

use crate::db::Database;
use crate::orders::OrderStore;
use crate::user_auth::UserAuthService;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL database (pool owner)
    pub db: Arc<Database>,
    /// Order store facade
    pub orders: Arc<OrderStore>,
    /// User auth service (register/login/JWT)
    pub user_auth: Arc<UserAuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, orders: Arc<OrderStore>, user_auth: Arc<UserAuthService>) -> Self {
        Self {
            db,
            orders,
            user_auth,
        }
    }
}
