//! Order-Desk entry point
//!
//! Startup sequence: config, logging, database pool, HTTP gateway.
//! The pool is created once here and torn down after the server drains.

use std::sync::Arc;

use order_desk::config::AppConfig;
use order_desk::db::Database;
use order_desk::gateway::{self, state::AppState};
use order_desk::logging::init_logging;
use order_desk::orders::OrderStore;
use order_desk::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    tracing::info!("Starting order-desk (env: {})", env);

    let db = Arc::new(Database::connect(&config.postgres_url).await?);

    let orders = Arc::new(OrderStore::new(db.pool().clone()));
    let user_auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_secs,
    ));
    let state = Arc::new(AppState::new(db.clone(), orders, user_auth));

    gateway::run_server(&config.gateway, state).await?;

    db.close().await;
    Ok(())
}
