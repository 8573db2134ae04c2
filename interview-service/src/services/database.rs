//! MongoDB-backed interview store.

use crate::models::InterviewRecord;
use crate::services::metrics;
use crate::services::store::InterviewStore;
use async_trait::async_trait;
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Instant;

#[derive(Clone)]
pub struct InterviewDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl InterviewDb {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for interview-service");

        // Per-user listing, newest first
        let user_created_index = IndexModel::builder()
            .keys(doc! { "userId": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_created_at_idx".to_string())
                    .build(),
            )
            .build();

        self.interviews()
            .create_index(user_created_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create user_created_at index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub fn interviews(&self) -> Collection<InterviewRecord> {
        self.db.collection(&self.collection)
    }
}

#[async_trait]
impl InterviewStore for InterviewDb {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, record: &InterviewRecord) -> Result<(), AppError> {
        let start = Instant::now();
        let result = self.interviews().insert_one(record, None).await;
        metrics::record_db_operation("insert", &self.collection, start.elapsed().as_secs_f64());

        let inserted = result.map_err(|e| {
            metrics::record_db_error("insert", &self.collection);
            tracing::error!("Failed to insert interview: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        tracing::debug!(id = ?inserted.inserted_id, "Interview stored");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
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
}
