//! Source records and readers
//!
//! A source is an external system-of-record reached through a reader trait.
//! Readers answer with the source's own record shapes; the mapper module
//! owns the transform into domain entities.

mod memory;
mod reader;
mod records;

pub use memory::MemorySourceReader;
pub use reader::{CourseSourceReader, ParticipantSourceReader};
pub use records::{CourseSource, ParticipantSource};
