//! Source reader traits
//!
//! One reader per record kind. `Ok(None)` means the source answered and has
//! no such record; transport failures surface as `Repository` errors. The
//! orchestrator decides what absence means for each operation.

use async_trait::async_trait;

use courseloop_core::{Result, Source};

use crate::source::records::{CourseSource, ParticipantSource};

/// Reads course records out of a source system.
#[async_trait]
pub trait CourseSourceReader: Send + Sync {
    /// Find a course record by the source's own id.
    async fn find_course(&self, source: Source, id: &str) -> Result<Option<CourseSource>>;
}

/// Reads participant records out of a source system.
#[async_trait]
pub trait ParticipantSourceReader: Send + Sync {
    /// Find a participant record by the source's own id.
    async fn find_participant(&self, source: Source, id: &str)
        -> Result<Option<ParticipantSource>>;
}
