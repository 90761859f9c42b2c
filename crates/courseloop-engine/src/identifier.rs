//! Polymorphic identifiers
//!
//! Callers name an entity by any of a closed set of identifier kinds. The
//! wire shape is `{ "identifier": <kind>, "value": <string> }`; unknown
//! kinds fail at deserialization. Resolution parses the value into its
//! typed form and is pure.

use serde::{Deserialize, Serialize};

use courseloop_core::source::parse_source_id_value;
use courseloop_core::{CourseId, ParticipantId, ReconcileError, Result, SourceId};

/// A course named by one of its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "identifier", content = "value", rename_all = "camelCase")]
pub enum CourseIdentifier {
    Id(String),
    IdSourceValue(String),
    Slug(String),
}

/// A resolved, typed course lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseLookup {
    Id(CourseId),
    SourceValue(SourceId),
    Slug(String),
}

impl CourseIdentifier {
    /// Parse the carried value into its typed lookup.
    pub fn resolve(&self) -> Result<CourseLookup> {
        match self {
            CourseIdentifier::Id(value) => Ok(CourseLookup::Id(parse_id(value)?)),
            CourseIdentifier::IdSourceValue(value) => {
                Ok(CourseLookup::SourceValue(parse_source_id_value(value)?))
            }
            CourseIdentifier::Slug(value) => Ok(CourseLookup::Slug(parse_slug(value)?)),
        }
    }
}

/// A participant named by one of its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "identifier", content = "value", rename_all = "camelCase")]
pub enum ParticipantIdentifier {
    Id(String),
    IdSourceValue(String),
}

/// A resolved, typed participant lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantLookup {
    Id(ParticipantId),
    SourceValue(SourceId),
}

impl ParticipantIdentifier {
    /// Parse the carried value into its typed lookup.
    pub fn resolve(&self) -> Result<ParticipantLookup> {
        match self {
            ParticipantIdentifier::Id(value) => Ok(ParticipantLookup::Id(parse_id(value)?)),
            ParticipantIdentifier::IdSourceValue(value) => {
                Ok(ParticipantLookup::SourceValue(parse_source_id_value(value)?))
            }
        }
    }
}

fn parse_id<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| ReconcileError::request_invalid(format!("id: {e}")))
}

fn parse_slug(value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(ReconcileError::request_invalid("slug is empty"));
    }
    let valid = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !valid {
        return Err(ReconcileError::request_invalid(format!(
            "slug has characters outside [a-z0-9_-]: {value}"
        )));
    }
    Ok(value.to_string())
}
