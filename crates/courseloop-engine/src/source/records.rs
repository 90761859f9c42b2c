//! Source-record shapes
//!
//! These carry the source's own vocabulary: string statuses, external ids
//! and a course reference by the source's id, not ours. Nothing here is
//! validated; the mapper rejects malformed records with `SourceInvalid`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course as the source system reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSource {
    /// The source's id for this course.
    pub id: String,

    /// The source's status vocabulary, e.g. `scheduled`, `open`, `closed`.
    pub status: String,

    pub name: String,

    pub date_open: Option<DateTime<Utc>>,

    pub date_closed: Option<DateTime<Utc>>,
}

/// A participant as the source system reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSource {
    /// The source's id for this participant.
    pub id: String,

    /// The source's id for the parent course.
    pub course_id: String,

    /// The source's status vocabulary, e.g. `pending`, `confirmed`,
    /// `cancelled`.
    pub status: String,
}
