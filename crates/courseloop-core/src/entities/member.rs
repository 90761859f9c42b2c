//! The member entity.
//!
//! Members are owned by an external service; this crate only carries the
//! denormalized copy a participant travels with.

use serde::{Deserialize, Serialize};

use crate::ids::MemberId;
use crate::source::SourceId;

/// Member lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed and in good standing.
    Active,
}

impl MemberStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "pending",
            MemberStatus::Active => "active",
        }
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MemberStatus::Pending),
            "active" => Ok(MemberStatus::Active),
            _ => Err(format!("unknown member status: {s}")),
        }
    }
}

/// A person known to the platform, denormalized onto participant rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Canonical id, assigned by the owning service.
    pub id: MemberId,

    /// External identifiers, at most one per source.
    pub source_ids: Vec<SourceId>,

    pub status: MemberStatus,

    pub name: String,

    pub email: String,

    pub organisation_name: String,

    /// Slug of the account that owns this member.
    pub account_owner: String,
}
