//! The course entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CourseId;
use crate::source::SourceId;

/// Course lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Not yet open for participation.
    Pending,
    /// Currently running.
    Active,
    /// Finished or withdrawn.
    Closed,
}

impl CourseStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Pending => "pending",
            CourseStatus::Active => "active",
            CourseStatus::Closed => "closed",
        }
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CourseStatus::Pending),
            "active" => Ok(CourseStatus::Active),
            "closed" => Ok(CourseStatus::Closed),
            _ => Err(format!("unknown course status: {s}")),
        }
    }
}

/// How the course is delivered and supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseSupportType {
    /// Run with a facilitator.
    Facilitated,
    /// Self-paced, no facilitator.
    SelfDirected,
}

impl CourseSupportType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseSupportType::Facilitated => "facilitated",
            CourseSupportType::SelfDirected => "self_directed",
        }
    }
}

impl std::str::FromStr for CourseSupportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facilitated" => Ok(CourseSupportType::Facilitated),
            "self_directed" => Ok(CourseSupportType::SelfDirected),
            _ => Err(format!("unknown course support type: {s}")),
        }
    }
}

/// A course, the parent entity of the single-table scheme.
///
/// The canonical id is generated at create time and never changes. The slug
/// and `year_month_open` are derived from source data; `source_ids` records
/// where the course came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Canonical id. Immutable once assigned.
    pub id: CourseId,

    /// URL-safe, deterministically derived slug.
    pub slug: String,

    /// Lifecycle status, sourced from the external record.
    pub status: CourseStatus,

    /// External identifiers, at most one per source.
    pub source_ids: Vec<SourceId>,

    /// Delivery/support model. Business-owned default, not sourced.
    pub support_type: CourseSupportType,

    /// Display name, sourced from the external record.
    pub name: String,

    /// When the course opens.
    pub date_open: Option<DateTime<Utc>>,

    /// When the course closes.
    pub date_closed: Option<DateTime<Utc>>,

    /// `yyyy-mm` of the open date, derived.
    pub year_month_open: Option<String>,

    /// Slug of the account that owns this course.
    pub account_owner: String,
}
