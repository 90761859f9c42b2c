//! courseloop Engine
//!
//! The reconciliation orchestrator and lookup handlers. Records flow in from
//! external sources, are transformed into domain entities and reconciled
//! against the single-table store: create, update or upsert, with lookups
//! dispatching on polymorphic identifiers.
//!
//! # Modules
//!
//! - [`source`] - Source-record types and reader traits
//! - [`repository`] - Entity repositories over the store adapter
//! - [`identifier`] - Polymorphic identifier descriptors and resolution
//! - [`requests`] - Validated request DTOs
//! - [`mapper`] - Source-to-domain transforms and merges
//! - [`service`] - Create/update/upsert/find services per entity

pub mod identifier;
pub mod mapper;
pub mod repository;
pub mod requests;
pub mod service;
pub mod source;

pub use identifier::{CourseIdentifier, CourseLookup, ParticipantIdentifier, ParticipantLookup};
pub use repository::{CourseRepository, ParticipantRepository};
pub use requests::{
    FindCourseRequest, FindParticipantRequest, MemberPayload, UpsertCourseRequest,
    UpsertParticipantRequest,
};
pub use service::{CourseService, ParticipantService};
pub use source::{
    CourseSource, CourseSourceReader, MemorySourceReader, ParticipantSource,
    ParticipantSourceReader,
};

#[cfg(test)]
pub(crate) mod testing;
