//! Entity store adapter
//!
//! One [`EntityStore`] per entity kind, parameterized with the entity's
//! slice of the single table: its logical ids and the secondary indexes it
//! may query. All names are derived once at construction.

use std::sync::Arc;

use tracing::{debug, instrument};

use courseloop_core::{ReconcileError, Result};

use crate::client::StoreClient;
use crate::item::Item;
use crate::naming::{derive_names, StoreNames};

/// Which kind of secondary index to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRef<'a> {
    Global(&'a str),
    Local(&'a str),
}

/// Get/query/put access to one entity kind's rows.
pub struct EntityStore {
    client: Arc<dyn StoreClient>,
    names: StoreNames,
    entity_id: String,
}

impl EntityStore {
    /// Build a store for one entity kind.
    ///
    /// `global_index_ids`/`local_index_ids` enumerate every index this
    /// entity is allowed to query; asking for any other id is a request
    /// error, not a transport call.
    pub fn new(
        client: Arc<dyn StoreClient>,
        prefix: &str,
        entity_id: &str,
        table_id: &str,
        global_index_ids: &[&str],
        local_index_ids: &[&str],
    ) -> Self {
        Self {
            client,
            names: derive_names(prefix, entity_id, table_id, global_index_ids, local_index_ids),
            entity_id: entity_id.to_string(),
        }
    }

    /// The derived physical names, mainly for seeding test rows.
    #[must_use]
    pub fn names(&self) -> &StoreNames {
        &self.names
    }

    /// Fetch one row by its full key.
    #[instrument(skip(self), fields(entity = %self.entity_id))]
    pub async fn get_one(&self, primary_key: &str, sort_key: &str) -> Result<Item> {
        let found = self
            .client
            .get_item(&self.names.table, primary_key, sort_key)
            .await
            .map_err(|e| ReconcileError::repository("get_item failed", e))?;
        found.ok_or_else(|| {
            ReconcileError::not_found(format!(
                "{}: no row for key {primary_key}/{sort_key}",
                self.entity_id
            ))
        })
    }

    /// Query a secondary index expecting at most one row.
    ///
    /// Zero rows is the same not-found signal as a missed get. More than one
    /// row means the index key was not unique; the first row in index order
    /// is returned.
    #[instrument(skip(self), fields(entity = %self.entity_id))]
    pub async fn query_one(
        &self,
        index: IndexRef<'_>,
        key_attribute: &str,
        value: &str,
    ) -> Result<Item> {
        let index_name = match index {
            IndexRef::Global(id) => self.names.global_index(id)?,
            IndexRef::Local(id) => self.names.local_index(id)?,
        };
        let mut rows = self
            .client
            .query_index(&self.names.table, index_name, key_attribute, value)
            .await
            .map_err(|e| ReconcileError::repository("query_index failed", e))?;
        if rows.len() > 1 {
            debug!(
                count = rows.len(),
                index = index_name,
                "index query matched more than one row"
            );
        }
        if rows.is_empty() {
            return Err(ReconcileError::not_found(format!(
                "{}: no row where {key_attribute} = {value}",
                self.entity_id
            )));
        }
        Ok(rows.remove(0))
    }

    /// Write one row, overwriting whatever is there. Last write wins.
    #[instrument(skip(self, item), fields(entity = %self.entity_id))]
    pub async fn put(&self, item: Item) -> Result<()> {
        self.client
            .put_item(&self.names.table, item)
            .await
            .map_err(|e| ReconcileError::repository("put_item failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStoreClient;

    fn store(client: Arc<MemoryStoreClient>) -> EntityStore {
        EntityStore::new(client, "Test", "course", "courses", &["slug"], &[])
    }

    #[tokio::test]
    async fn test_get_one_not_found() {
        let client = Arc::new(MemoryStoreClient::new());
        let err = store(client).get_one("c-1", "c-1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_put_then_get_one() {
        let client = Arc::new(MemoryStoreClient::new());
        let store = store(client);
        let mut item = Item::new("c-1", "c-1");
        item.set_string("Course_Name", "Learn");
        store.put(item.clone()).await.unwrap();
        assert_eq!(store.get_one("c-1", "c-1").await.unwrap(), item);
    }

    #[tokio::test]
    async fn test_query_one_empty_is_not_found() {
        let client = Arc::new(MemoryStoreClient::new());
        let err = store(client)
            .query_one(IndexRef::Global("slug"), "Course_Slug", "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_query_one_hits() {
        let client = Arc::new(MemoryStoreClient::new());
        let store = store(client);
        let mut item = Item::new("c-1", "c-1");
        item.set_string("Course_Slug", "2023_03_dance");
        store.put(item).await.unwrap();

        let found = store
            .query_one(IndexRef::Global("slug"), "Course_Slug", "2023_03_dance")
            .await
            .unwrap();
        assert_eq!(found.primary_key(), Some("c-1"));
    }

    #[tokio::test]
    async fn test_unknown_index_is_request_error() {
        let client = Arc::new(MemoryStoreClient::new());
        let err = store(client)
            .query_one(IndexRef::Global("name"), "Course_Name", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ReconcileError::RequestInvalid { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_wraps() {
        let client = Arc::new(MemoryStoreClient::new());
        let store = store(client.clone());
        client.fail_next("socket timeout");
        let err = store.get_one("c-1", "c-1").await.unwrap_err();
        assert!(matches!(err, ReconcileError::Repository { .. }));
    }
}
