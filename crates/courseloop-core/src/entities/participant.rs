//! The participant entity.

use serde::{Deserialize, Serialize};

use crate::entities::{Course, Member};
use crate::ids::{CourseId, MemberId, ParticipantId};
use crate::source::{Source, SourceId};

/// Participant lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    /// Registered but not yet confirmed.
    Pending,
    /// Registered and confirmed.
    Registered,
    /// Withdrawn or removed.
    Cancelled,
}

impl ParticipantStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Pending => "pending",
            ParticipantStatus::Registered => "registered",
            ParticipantStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ParticipantStatus::Pending),
            "registered" => Ok(ParticipantStatus::Registered),
            "cancelled" => Ok(ParticipantStatus::Cancelled),
            _ => Err(format!("unknown participant status: {s}")),
        }
    }
}

/// A member's enrolment in a course.
///
/// Child of a course in the single-table scheme. Always carries a
/// denormalized copy of its course and member so reads never fan out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Canonical id. Immutable once assigned.
    pub id: ParticipantId,

    /// The member who is enrolled.
    pub member_id: MemberId,

    /// The course enrolled in.
    pub course_id: CourseId,

    /// The source that first created this participant, when known.
    pub source_origin: Option<Source>,

    /// External identifiers, at most one per source.
    pub source_ids: Vec<SourceId>,

    pub status: ParticipantStatus,

    /// Slug of the account that owns this participant.
    pub account_owner: String,

    /// Denormalized parent course.
    pub course: Course,

    /// Denormalized member.
    pub member: Member,
}
