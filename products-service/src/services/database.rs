use crate::models::Product;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::ErrorKind,
    options::ClientOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

pub const DEFAULT_DATABASE: &str = "products_db";

/// Store handle shared by every request. Cloning is cheap; the driver pools
/// connections behind `Client`.
#[derive(Clone)]
pub struct ProductDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl ProductDb {
    /// Build a handle for `url`. The database is `database` if given, else the
    /// one named in the connection string, else [`DEFAULT_DATABASE`].
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(
        url: &str,
        database: Option<&str>,
        collection: &str,
    ) -> Result<Self, AppError> {
        let options = ClientOptions::parse(url).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            connection_error(e)
        })?;

        let database = database
            .map(str::to_owned)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let hosts: Vec<String> = options.hosts.iter().map(|h| h.to_string()).collect();
        tracing::info!(hosts = ?hosts, database = %database, "Connecting to MongoDB");

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            connection_error(e)
        })?;
        let db = client.database(&database);

        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(&self.collection)
    }

    fn raw_documents(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    /// True when the collection holds at least one document of any shape.
    pub async fn has_products(&self) -> Result<bool, AppError> {
        let existing = self
            .raw_documents()
            .find_one(doc! {}, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check for existing products: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(existing.is_some())
    }

    /// Insert `products` in one batch and return the ids in insertion order.
    pub async fn insert_products(&self, products: &[Product]) -> Result<Vec<ObjectId>, AppError> {
        let result = self
            .products()
            .insert_many(products, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert products: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let mut inserted: Vec<_> = result.inserted_ids.into_iter().collect();
        inserted.sort_by_key(|(index, _)| *index);

        Ok(inserted
            .into_iter()
            .filter_map(|(_, id)| id.as_object_id())
            .collect())
    }

    /// Every product in store cursor order. No filter, sort or paging.
    /// Documents that do not read as a product are logged and left out.
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self
            .raw_documents()
            .find(None, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect products: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(documents
            .iter()
            .filter_map(|document| match Product::from_stored(document) {
                Ok(product) => Some(product),
                Err(reason) => {
                    tracing::warn!(
                        collection = %self.collection,
                        id = ?document.get("_id"),
                        reason = %reason,
                        "Skipping document that is not a product"
                    );
                    None
                }
            })
            .collect())
    }

    /// Drop the whole database. Used by tests to clean up.
    pub async fn drop_database(&self) -> Result<(), AppError> {
        self.db.drop(None).await.map_err(AppError::from)
    }
}

/// A malformed connection string is a configuration problem; anything else
/// (e.g. an SRV lookup failing) is a transport failure.
fn connection_error(err: mongodb::error::Error) -> AppError {
    match *err.kind {
        ErrorKind::InvalidArgument { .. } => {
            AppError::ConfigError(anyhow::anyhow!("Invalid DATABASE_URL: {}", err))
        }
        _ => AppError::DatabaseError(anyhow::anyhow!(err.to_string())),
    }
}
