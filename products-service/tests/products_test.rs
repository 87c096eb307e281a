mod common;

use axum::{body::Body, http::Request};
use common::{test_mongodb_uri, unique_db_name, unreachable_state, TestApp};
use mongodb::bson::doc;
use products_service::config::DEFAULT_COLLECTION;
use products_service::models::{Product, SAMPLE_PRODUCTS};
use products_service::seed::{seed_sample_products, SeedOutcome};
use products_service::services::ProductDb;
use products_service::startup::{build_router, AppState};
use reqwest::Client;
use std::collections::HashMap;
use tower::util::ServiceExt;

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn list_returns_the_seeded_products() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(&app.address)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.len(), 3);

    let expected: HashMap<&str, u64> = SAMPLE_PRODUCTS
        .iter()
        .map(|(kind, count)| (*kind, *count as u64))
        .collect();
    for product in &body {
        let id = product["_id"].as_str().expect("_id should be a string");
        assert_eq!(id.len(), 24);
        let kind = product["kind"].as_str().expect("kind should be a string");
        let count = product["count"].as_u64().expect("count should be a non-negative integer");
        assert_eq!(expected.get(kind), Some(&count), "unexpected product {}", product);
    }

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn seeding_an_empty_collection_inserts_three_products() {
    let db_name = unique_db_name();
    let db = ProductDb::connect(&test_mongodb_uri(), Some(&db_name), DEFAULT_COLLECTION)
        .await
        .expect("Failed to connect");

    assert!(!db.has_products().await.unwrap());

    let outcome = seed_sample_products(&db).await.expect("Seeding failed");
    assert_eq!(outcome.inserted_count(), 3);
    assert!(db.has_products().await.unwrap());

    let stored = db.list_products().await.unwrap();
    assert_eq!(stored.len(), 3);
    if let SeedOutcome::Inserted { ids } = outcome {
        for product in &stored {
            assert!(ids.contains(&product.id.expect("stored product should have an id")));
        }
    }

    db.drop_database().await.ok();
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn seeding_twice_does_not_duplicate_products() {
    let db_name = unique_db_name();
    let db = ProductDb::connect(&test_mongodb_uri(), Some(&db_name), DEFAULT_COLLECTION)
        .await
        .expect("Failed to connect");

    let first = seed_sample_products(&db).await.unwrap();
    let second = seed_sample_products(&db).await.unwrap();

    assert_eq!(first.inserted_count(), 3);
    assert_eq!(second, SeedOutcome::Skipped);
    assert_eq!(db.list_products().await.unwrap().len(), 3);

    db.drop_database().await.ok();
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn restarting_the_service_keeps_a_single_sample_set() {
    let first = TestApp::spawn().await;
    assert_eq!(first.seed_outcome.inserted_count(), 3);

    let second = TestApp::spawn_with_db(&first.db_name).await;
    assert_eq!(second.seed_outcome, SeedOutcome::Skipped);

    let body: Vec<serde_json::Value> = Client::new()
        .get(&second.address)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(body.len(), 3);

    first.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn unrelated_data_suppresses_seeding() {
    let db_name = unique_db_name();
    let db = ProductDb::connect(&test_mongodb_uri(), Some(&db_name), DEFAULT_COLLECTION)
        .await
        .expect("Failed to connect");

    db.products()
        .insert_one(Product::new("kiwi", 7), None)
        .await
        .unwrap();

    let outcome = seed_sample_products(&db).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Skipped);

    let stored = db.list_products().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].kind, "kiwi");

    let raw = db
        .products()
        .clone_with_type::<mongodb::bson::Document>()
        .count_documents(doc! {}, None)
        .await
        .unwrap();
    assert_eq!(raw, 1);

    db.drop_database().await.ok();
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn health_and_ready_report_ok_with_a_live_store() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let health = client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(health.status().is_success());
    let body: serde_json::Value = health.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "products-service");

    let ready = client
        .get(&format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(ready.status().is_success());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn list_skips_documents_that_are_not_products() {
    let db_name = unique_db_name();
    let db = ProductDb::connect(&test_mongodb_uri(), Some(&db_name), DEFAULT_COLLECTION)
        .await
        .expect("Failed to connect");

    let raw = db.products().clone_with_type::<mongodb::bson::Document>();
    raw.insert_one(doc! { "name": "legacy" }, None).await.unwrap();
    raw.insert_one(doc! { "kind": "kiwi", "count": 7.0 }, None)
        .await
        .unwrap();

    assert_eq!(seed_sample_products(&db).await.unwrap(), SeedOutcome::Skipped);

    let response = build_router(AppState { db: db.clone() })
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["kind"], "kiwi");
    assert_eq!(body[0]["count"], 7);

    db.drop_database().await.ok();
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI, default mongodb://localhost:27017)"]
async fn listing_recovers_once_the_store_is_reachable() {
    let unreachable = build_router(unreachable_state().await);
    let response = unreachable
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let app = TestApp::spawn().await;
    let client = Client::new();

    for _ in 0..2 {
        let response = client
            .get(&app.address)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 200);
        let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body.len(), 3);
    }

    // The failed handle keeps answering rather than taking anything down.
    let response = unreachable
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    app.cleanup().await;
}
