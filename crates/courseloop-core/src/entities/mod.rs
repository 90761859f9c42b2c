//! Domain entities
//!
//! The internally-owned representations of courses, participants and
//! members. A participant is a child of a course and always travels with a
//! denormalized copy of its course and member.

mod course;
mod member;
mod participant;

pub use course::{Course, CourseStatus, CourseSupportType};
pub use member::{Member, MemberStatus};
pub use participant::{Participant, ParticipantStatus};
