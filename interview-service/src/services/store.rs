//! Append-only persistence for generated interviews.

use crate::models::InterviewRecord;
use async_trait::async_trait;
use service_core::error::AppError;
use tokio::sync::RwLock;

#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Backend name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Append a record. Records are never updated or removed.
    async fn insert(&self, record: &InterviewRecord) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// In-process store for local runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<InterviewRecord>>,
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: RwLock::default(),
            fail_with: Some(message.into()),
        }
    }

    /// Snapshot of everything written so far, in insertion order.
    pub async fn records(&self) -> Vec<InterviewRecord> {
        self.records.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl InterviewStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: &InterviewRecord) -> Result<(), AppError> {
        if let Some(message) = &self.fail_with {
            return Err(AppError::DatabaseError(anyhow::anyhow!(message.clone())));
        }

        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        match &self.fail_with {
            Some(message) => Err(AppError::DatabaseError(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterviewRequest;
    use chrono::Utc;

    fn record(user: &str) -> InterviewRecord {
        let mut params = InterviewRequest::default().into_params();
        params.userid = user.to_string();
        InterviewRecord::new(params, vec!["Q1".to_string()], None, Utc::now())
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let store = MemoryStore::new();
        store.insert(&record("a")).await.unwrap();
        store.insert(&record("b")).await.unwrap();

        let users: Vec<String> = store
            .records()
            .await
            .into_iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(users, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn failing_store_writes_nothing() {
        let store = MemoryStore::failing("disk full");

        let err = store.insert(&record("a")).await.unwrap_err();
        assert_eq!(err.to_string(), "Database error: disk full");
        assert!(store.is_empty().await);
        assert!(store.health_check().await.is_err());
    }
}
