#![allow(dead_code)]

use products_service::config::{DatabaseConfig, ProductsConfig, DEFAULT_COLLECTION};
use products_service::seed::SeedOutcome;
use products_service::services::ProductDb;
use products_service::startup::{AppState, Application};
use service_core::config::Config as CoreConfig;
use uuid::Uuid;

/// Connection string for a store nobody listens on. Server selection gives
/// up quickly so requests fail fast.
pub const UNREACHABLE_DATABASE_URL: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300&connectTimeoutMS=300";

/// State whose store handle points at [`UNREACHABLE_DATABASE_URL`].
pub async fn unreachable_state() -> AppState {
    let db = ProductDb::connect(
        UNREACHABLE_DATABASE_URL,
        Some("products_unreachable"),
        DEFAULT_COLLECTION,
    )
    .await
    .expect("Client construction should not touch the network");

    AppState { db }
}

pub fn test_mongodb_uri() -> String {
    std::env::var("TEST_MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

pub fn test_config(db_name: &str) -> ProductsConfig {
    ProductsConfig {
        common: CoreConfig { port: 0 },
        database: DatabaseConfig {
            url: test_mongodb_uri(),
            name: Some(db_name.to_string()),
            collection: DEFAULT_COLLECTION.to_string(),
        },
    }
}

pub fn unique_db_name() -> String {
    format!("products_test_{}", Uuid::new_v4().simple())
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: ProductDb,
    pub db_name: String,
    pub seed_outcome: SeedOutcome,
}

impl TestApp {
    /// Build and spawn the service against a fresh database.
    pub async fn spawn() -> Self {
        Self::spawn_with_db(&unique_db_name()).await
    }

    /// Build and spawn the service against `db_name`, which may already hold data.
    pub async fn spawn_with_db(db_name: &str) -> Self {
        let app = Application::build(test_config(db_name))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let seed_outcome = app.seed_outcome().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name: db_name.to_string(),
            seed_outcome,
        }
    }

    pub async fn cleanup(&self) {
        self.db.drop_database().await.ok();
    }
}
