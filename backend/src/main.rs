//! Pizza Tracker Backend
//!
//! Tracks pizzerias visited in a city, behind email/password
//! authentication with short-lived access tokens and longer-lived
//! refresh tokens.
//!
//! Layers, top to bottom: routes, services (auth flows and pizzerias),
//! store traits with Postgres implementations.

use anyhow::{ensure, Result};
use pizza_tracker_backend::{
    auth::TokenKind,
    config::{AppConfig, DEVELOPMENT_SECRET},
    db,
    repositories::{PgPizzeriaStore, PgUserStore},
    routes,
    state::AppState,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production,
        "Starting Pizza Tracker Backend"
    );

    if production {
        check_production_config(&config)?;
    }

    let pool = db::create_pool(&config.database).await?;
    // Production schema changes go through a separate migration job
    if !production {
        db::run_migrations(&pool).await?;
    }

    let state = AppState::new(
        config.clone(),
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgPizzeriaStore::new(pool)),
    )?;
    warn_on_ttl_order(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, routes::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON lines in production, pretty output otherwise; `RUST_LOG` wins if set
fn init_tracing(production: bool) {
    let default_filter = if production {
        "pizza_tracker_backend=info,tower_http=info"
    } else {
        "pizza_tracker_backend=debug,tower_http=debug,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if production {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

fn check_production_config(config: &AppConfig) -> Result<()> {
    ensure!(
        config.jwt.secret_key != DEVELOPMENT_SECRET && config.jwt.secret_key.len() >= 32,
        "JWT secret must be at least 32 characters and not the development default"
    );

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL points at localhost in production");
    }

    Ok(())
}

fn warn_on_ttl_order(state: &AppState) {
    let tokens = state.auth().tokens();
    let access = tokens.ttl(TokenKind::Access);
    let refresh = tokens.ttl(TokenKind::Refresh);

    if refresh <= access {
        warn!(
            access_ttl_secs = access.num_seconds(),
            refresh_ttl_secs = refresh.num_seconds(),
            "Refresh tokens do not outlive access tokens"
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM; only Ctrl+C stops the server");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
            _ = terminate.recv() => info!("Received SIGTERM, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl+C, shutting down");
    }
}
