//! courseloop Core Library
//!
//! Shared types for the courseloop reconciliation engine.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (CourseId, ParticipantId, MemberId)
//! - [`error`] - The reconciliation error taxonomy (ReconcileError)
//! - [`source`] - The closed source enumeration and `SOURCE#externalId` encoding
//! - [`entities`] - Domain entities (Course, Participant, Member)
//! - [`slug`] - Deterministic slug and year-month derivation
//! - [`config`] - Static account configuration
//! - [`envelope`] - The command response envelope

pub mod config;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod slug;
pub mod source;

pub use config::AccountConfig;
pub use entities::{
    Course, CourseStatus, CourseSupportType, Member, MemberStatus, Participant, ParticipantStatus,
};
pub use envelope::{ResponseEvent, ResponseOutcome, ResponsePayload};
pub use error::{ReconcileError, Result};
pub use ids::{CourseId, MemberId, ParticipantId};
pub use source::{Source, SourceId};
