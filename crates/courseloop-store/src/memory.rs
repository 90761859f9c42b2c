//! In-memory store client
//!
//! Backs tests for everything above the transport seam. Rows live in a map
//! keyed by `(primary key, sort key)` per table; index queries scan the
//! table's rows for an equal key attribute, mirroring how the adapter uses
//! real indexes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{StoreClient, StoreClientError};
use crate::item::Item;

type TableRows = HashMap<(String, String), Item>;

/// An in-memory [`StoreClient`].
#[derive(Debug, Default)]
pub struct MemoryStoreClient {
    tables: Mutex<HashMap<String, TableRows>>,
    fail_next: Mutex<Option<String>>,
}

impl MemoryStoreClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next operation fail with the given message.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some(message.into());
    }

    /// Seed a row directly, bypassing the adapter.
    pub fn seed(&self, table: &str, item: Item) {
        let key = row_key(&item);
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .insert(key, item);
    }

    /// Number of rows currently held in a table.
    #[must_use]
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map_or(0, TableRows::len)
    }

    fn check_fail(&self) -> Result<(), StoreClientError> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(StoreClientError::new(message));
        }
        Ok(())
    }
}

fn row_key(item: &Item) -> (String, String) {
    (
        item.primary_key().unwrap_or_default().to_string(),
        item.sort_key().unwrap_or_default().to_string(),
    )
}

#[async_trait]
impl StoreClient for MemoryStoreClient {
    async fn get_item(
        &self,
        table: &str,
        primary_key: &str,
        sort_key: &str,
    ) -> Result<Option<Item>, StoreClientError> {
        self.check_fail()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .and_then(|rows| rows.get(&(primary_key.to_string(), sort_key.to_string())))
            .cloned())
    }

    async fn query_index(
        &self,
        table: &str,
        _index: &str,
        key_attribute: &str,
        value: &str,
    ) -> Result<Vec<Item>, StoreClientError> {
        self.check_fail()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|rows| {
                rows.values()
                    .filter(|item| item.opt_string(key_attribute) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreClientError> {
        self.check_fail()?;
        let key = row_key(&item);
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .insert(key, item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let client = MemoryStoreClient::new();
        let mut item = Item::new("c-1", "c-1");
        item.set_string("Course_Name", "Learn");
        client.put_item("CoursesTable", item.clone()).await.unwrap();

        let found = client.get_item("CoursesTable", "c-1", "c-1").await.unwrap();
        assert_eq!(found, Some(item));
        assert!(client
            .get_item("CoursesTable", "c-2", "c-2")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let client = MemoryStoreClient::new();
        let mut first = Item::new("c-1", "c-1");
        first.set_string("Course_Name", "Before");
        let mut second = Item::new("c-1", "c-1");
        second.set_string("Course_Name", "After");
        client.put_item("T", first).await.unwrap();
        client.put_item("T", second).await.unwrap();

        assert_eq!(client.row_count("T"), 1);
        let found = client.get_item("T", "c-1", "c-1").await.unwrap().unwrap();
        assert_eq!(found.opt_string("Course_Name"), Some("After"));
    }

    #[tokio::test]
    async fn test_query_by_attribute() {
        let client = MemoryStoreClient::new();
        let mut a = Item::new("c-1", "c-1");
        a.set_string("Course_Slug", "2023_03_dance");
        let mut b = Item::new("c-2", "c-2");
        b.set_string("Course_Slug", "2023_04_sing");
        client.put_item("T", a).await.unwrap();
        client.put_item("T", b).await.unwrap();

        let hits = client
            .query_index("T", "idx", "Course_Slug", "2023_03_dance")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].primary_key(), Some("c-1"));

        let misses = client
            .query_index("T", "idx", "Course_Slug", "2023_05_paint")
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let client = MemoryStoreClient::new();
        client.fail_next("socket timeout");
        assert!(client.get_item("T", "a", "a").await.is_err());
        assert!(client.get_item("T", "a", "a").await.is_ok());
    }
}
