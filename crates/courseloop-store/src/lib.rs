//! courseloop Store
//!
//! Single-table persistence for the courseloop engine. One physical table
//! holds every entity kind; rows are flat attribute maps keyed by
//! `primaryKey`/`sortKey` and queried through named secondary indexes.
//!
//! # Modules
//!
//! - [`naming`] - Pure derivation of physical table and index names
//! - [`item`] - The flat persistence item (string/integer/null attributes)
//! - [`client`] - The `StoreClient` transport trait
//! - [`memory`] - In-memory `StoreClient` for tests
//! - [`adapter`] - `EntityStore`: get/query/put against one entity's slice
//! - [`rows`] - Per-entity row schemas (entity <-> item mappers)

pub mod adapter;
pub mod client;
pub mod item;
pub mod memory;
pub mod naming;
pub mod rows;

pub use adapter::{EntityStore, IndexRef};
pub use client::{StoreClient, StoreClientError};
pub use item::{AttrValue, Item};
pub use memory::MemoryStoreClient;
pub use naming::{dash_to_camel, derive_names, StoreNames};
