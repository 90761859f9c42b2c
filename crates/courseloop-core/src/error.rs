//! Reconciliation error taxonomy
//!
//! Every failure a caller can observe is one of these variants. Parsing and
//! validation failures are raised before any I/O; repository failures wrap
//! the transport error unchanged.

use thiserror::Error;

/// Error produced by the reconciliation and lookup engine.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Malformed caller input. Raised during parsing, never reaches the store.
    #[error("invalid request: {message}")]
    RequestInvalid { message: String },

    /// A source record (or stored row) failed the entity mapper's shape check.
    #[error("invalid source data: {message}")]
    SourceInvalid { message: String },

    /// Neither a get nor an index query produced a row, or the source lookup
    /// found nothing.
    #[error("item not found: {message}")]
    ItemNotFound { message: String },

    /// A create found an already-existing record.
    #[error("item already exists: {message}")]
    ItemConflict { message: String },

    /// The persist step was rejected as a no-op (e.g. nothing to update).
    /// The upsert path converts this into a `no-change` outcome.
    #[error("item update rejected: {message}")]
    ItemUpdate { message: String },

    /// A transport failure from the physical store or source collaborator,
    /// re-raised unchanged. No retries happen at this layer.
    #[error("repository error: {message}")]
    Repository {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ReconcileError {
    /// Create a `RequestInvalid` error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::RequestInvalid {
            message: message.into(),
        }
    }

    /// Create a `SourceInvalid` error.
    pub fn source_invalid(message: impl Into<String>) -> Self {
        Self::SourceInvalid {
            message: message.into(),
        }
    }

    /// Create an `ItemNotFound` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ItemNotFound {
            message: message.into(),
        }
    }

    /// Create an `ItemConflict` error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::ItemConflict {
            message: message.into(),
        }
    }

    /// Create an `ItemUpdate` (benign no-op) error.
    pub fn item_update(message: impl Into<String>) -> Self {
        Self::ItemUpdate {
            message: message.into(),
        }
    }

    /// Wrap a transport failure without altering it.
    pub fn repository(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Repository {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is the not-found signal.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound { .. })
    }

    /// Whether this error is the benign no-op update signal.
    #[must_use]
    pub fn is_item_update(&self) -> bool {
        matches!(self, Self::ItemUpdate { .. })
    }
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
