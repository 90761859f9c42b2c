//! Store transport trait
//!
//! The physical store is an external collaborator behind this trait. The
//! adapter never retries and never interprets transport failures; they are
//! wrapped and re-raised unchanged.

use async_trait::async_trait;
use thiserror::Error;

use crate::item::Item;

/// A transport failure from the physical store.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreClientError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Transport operations against the physical single table.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetch one row by its full key. `None` when no row exists.
    async fn get_item(
        &self,
        table: &str,
        primary_key: &str,
        sort_key: &str,
    ) -> Result<Option<Item>, StoreClientError>;

    /// Query a secondary index for rows whose key attribute equals `value`.
    async fn query_index(
        &self,
        table: &str,
        index: &str,
        key_attribute: &str,
        value: &str,
    ) -> Result<Vec<Item>, StoreClientError>;

    /// Write one row, overwriting any existing row with the same key.
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreClientError>;
}
