//! Application startup and lifecycle management.
//!
//! Startup runs connect, seed, bind in that order; configuration has already
//! been validated by the caller, so a missing `DATABASE_URL` never reaches
//! this point.

use crate::config::ProductsConfig;
use crate::handlers::{health_check, list_products, metrics::metrics, readiness_check};
use crate::seed::{seed_sample_products, SeedOutcome};
use crate::services::ProductDb;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Shared application state. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub db: ProductDb,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
    seed_outcome: SeedOutcome,
}

impl Application {
    /// Connect to the store, seed it if empty, and bind the listener.
    pub async fn build(config: ProductsConfig) -> Result<Self, AppError> {
        let db = ProductDb::connect(
            &config.database.url,
            config.database.name.as_deref(),
            &config.database.collection,
        )
        .await?;

        let seed_outcome = seed_sample_products(&db).await.map_err(|e| {
            tracing::error!("Failed to seed sample products: {}", e);
            e
        })?;

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Products service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { db },
            seed_outcome,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &ProductDb {
        &self.state.db
    }

    pub fn seed_outcome(&self) -> &SeedOutcome {
        &self.seed_outcome
    }

    /// Serve until the process exits.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            e
        })
    }
}
