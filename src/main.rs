// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod test_support;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let app_state = AppState::new(Config::from_env()?).await?;
    let bind_addr = app_state.config.bind_addr;

    db::MIGRATOR.run(&app_state.db_pool).await?;
    tracing::info!("database migrations applied");

    if let Some((username, password)) = &app_state.config.bootstrap_admin {
        if let Some(admin) = app_state
            .auth_service
            .ensure_bootstrap_admin(username, password)
            .await?
        {
            tracing::info!(user_id = admin.id, username = %admin.username, "bootstrap superuser created");
        }
    }

    let app = routes::build_router(app_state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
