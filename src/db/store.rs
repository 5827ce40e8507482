use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::filter::FilterSpec;
use super::models::Record;


#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}


/// Backend that executes [`FilterSpec`]s.
///
/// Timeouts and retries belong to the implementation; callers see a single
/// success or failure per fetch.
#[async_trait]
pub trait RecordStore: Send + Sync {

    async fn fetch(&self, filter: &FilterSpec) -> Result<Vec<Record>, StoreError>;


    fn store_name(&self) -> &str;
}


#[async_trait]
impl RecordStore for Arc<dyn RecordStore> {
    async fn fetch(&self, filter: &FilterSpec) -> Result<Vec<Record>, StoreError> {
        (**self).fetch(filter).await
    }

    fn store_name(&self) -> &str {
        (**self).store_name()
    }
}
