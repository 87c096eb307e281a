//! One-time seeding of the sample catalog.
//!
//! The gate is collection emptiness: if the collection holds any document,
//! even one unrelated to the sample set, nothing is inserted. Restarting the
//! service against a seeded store therefore never duplicates the samples.

use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::models::{sample_products, Product};
use crate::services::{record_seed, ProductDb};

/// Result of a seeding run.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    /// The collection already held data.
    Skipped,
    /// The sample set was inserted; ids are in insertion order.
    Inserted { ids: Vec<ObjectId> },
}

impl SeedOutcome {
    pub fn inserted_count(&self) -> usize {
        match self {
            SeedOutcome::Skipped => 0,
            SeedOutcome::Inserted { ids } => ids.len(),
        }
    }
}

/// Seed the fixed sample catalog if the collection is empty.
pub async fn seed_sample_products(db: &ProductDb) -> Result<SeedOutcome, AppError> {
    seed_products(db, &sample_products()).await
}

/// Insert `products` in a single batch unless the collection already has data.
pub async fn seed_products(db: &ProductDb, products: &[Product]) -> Result<SeedOutcome, AppError> {
    if db.has_products().await? {
        tracing::info!(
            collection = %db.collection_name(),
            "Collection already has data, skipping seed"
        );
        record_seed("skipped");
        return Ok(SeedOutcome::Skipped);
    }

    let ids = db.insert_products(products).await?;
    tracing::info!(
        collection = %db.collection_name(),
        count = ids.len(),
        ids = ?ids.iter().map(|id| id.to_hex()).collect::<Vec<_>>(),
        "Seeded sample products"
    );
    record_seed("inserted");

    Ok(SeedOutcome::Inserted { ids })
}
