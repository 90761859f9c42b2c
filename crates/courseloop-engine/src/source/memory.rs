//! In-memory source reader
//!
//! Implements both reader traits over seeded maps. Used by the service
//! tests; a real deployment supplies API-backed readers instead.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use courseloop_core::{ReconcileError, Result, Source};

use crate::source::reader::{CourseSourceReader, ParticipantSourceReader};
use crate::source::records::{CourseSource, ParticipantSource};

/// An in-memory source seeded with records.
#[derive(Debug, Default)]
pub struct MemorySourceReader {
    courses: Mutex<HashMap<(Source, String), CourseSource>>,
    participants: Mutex<HashMap<(Source, String), ParticipantSource>>,
    fail_next: Mutex<Option<String>>,
}

impl MemorySourceReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_course(&self, source: Source, record: CourseSource) {
        self.courses
            .lock()
            .unwrap()
            .insert((source, record.id.clone()), record);
    }

    pub fn seed_participant(&self, source: Source, record: ParticipantSource) {
        self.participants
            .lock()
            .unwrap()
            .insert((source, record.id.clone()), record);
    }

    /// Make the next read fail with the given message.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some(message.into());
    }

    fn check_fail(&self) -> Result<()> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(ReconcileError::Repository {
                message,
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CourseSourceReader for MemorySourceReader {
    async fn find_course(&self, source: Source, id: &str) -> Result<Option<CourseSource>> {
        self.check_fail()?;
        let courses = self.courses.lock().unwrap();
        Ok(courses.get(&(source, id.to_string())).cloned())
    }
}

#[async_trait]
impl ParticipantSourceReader for MemorySourceReader {
    async fn find_participant(
        &self,
        source: Source,
        id: &str,
    ) -> Result<Option<ParticipantSource>> {
        self.check_fail()?;
        let participants = self.participants.lock().unwrap();
        Ok(participants.get(&(source, id.to_string())).cloned())
    }
}
