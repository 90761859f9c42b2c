//! Sources and the combined source-value string
//!
//! A source is an external system-of-record. Entities carry zero or more
//! `(source, external id)` pairs; at most one per source name is used for
//! reconciliation lookups. Wherever a source reference must travel as a
//! single scalar (queue messages, index values) it is encoded as
//! `SOURCE#externalId`.

use serde::{Deserialize, Serialize};

use crate::error::{ReconcileError, Result};

/// Separator between the source tag and the external id.
const SOURCE_ID_VALUE_SEPARATOR: char = '#';

/// The closed set of external systems-of-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    /// The CRM, the primary account source.
    Crm,
    /// The community platform.
    Community,
}

impl Source {
    /// The case-sensitive wire tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Crm => "CRM",
            Source::Community => "COMMUNITY",
        }
    }

    /// All members of the enumeration.
    #[must_use]
    pub fn all() -> &'static [Source] {
        &[Source::Crm, Source::Community]
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CRM" => Ok(Source::Crm),
            "COMMUNITY" => Ok(Source::Community),
            _ => Err(format!("unknown source: {s}")),
        }
    }
}

/// An external identifier together with the source it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceId {
    /// The source system.
    pub source: Source,
    /// The identifier within that source. Never empty, never contains `#`.
    pub id: String,
}

impl SourceId {
    /// Create a source id pair from segments already known to be valid.
    pub fn new(source: Source, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }

    /// Create a source id pair, checking the external id segment.
    pub fn try_new(source: Source, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        check_external_id(&id)?;
        Ok(Self { source, id })
    }

    /// Encode as the combined `SOURCE#externalId` scalar.
    #[must_use]
    pub fn to_value(&self) -> String {
        encode_source_id_value(self.source, &self.id)
    }
}

// Deserialization runs the external-id check so malformed pairs cannot
// enter through the wire and poison encoded values later.
impl<'de> Deserialize<'de> for SourceId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            source: Source,
            id: String,
        }
        let raw = Raw::deserialize(deserializer)?;
        SourceId::try_new(raw.source, raw.id).map_err(serde::de::Error::custom)
    }
}

/// Check an external id segment: non-empty and free of the separator.
///
/// An id that fails this check could be encoded but never decoded back,
/// so it is rejected before it can be stored anywhere.
pub fn check_external_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(ReconcileError::request_invalid("external id is empty"));
    }
    if id.contains(SOURCE_ID_VALUE_SEPARATOR) {
        return Err(ReconcileError::request_invalid(format!(
            "external id contains {SOURCE_ID_VALUE_SEPARATOR}: {id}"
        )));
    }
    Ok(())
}

/// Encode a `(source, external id)` pair as a single scalar string.
#[must_use]
pub fn encode_source_id_value(source: Source, id: &str) -> String {
    format!("{}{}{}", source.as_str(), SOURCE_ID_VALUE_SEPARATOR, id)
}

/// Decode a combined source-value string.
///
/// Fails with `RequestInvalid` unless the input contains exactly one
/// separator, both segments are non-empty and the source tag is a member of
/// the closed enumeration. Round-tripping through encode then decode is
/// lossless.
pub fn parse_source_id_value(value: &str) -> Result<SourceId> {
    let mut parts = value.split(SOURCE_ID_VALUE_SEPARATOR);
    let (source, id) = match (parts.next(), parts.next(), parts.next()) {
        (Some(source), Some(id), None) => (source, id),
        _ => {
            return Err(ReconcileError::request_invalid(format!(
                "source value must be SOURCE{SOURCE_ID_VALUE_SEPARATOR}externalId, got: {value}"
            )))
        }
    };
    if source.is_empty() || id.is_empty() {
        return Err(ReconcileError::request_invalid(format!(
            "source value has an empty segment: {value}"
        )));
    }
    let source: Source = source
        .parse()
        .map_err(|e: String| ReconcileError::request_invalid(e))?;
    Ok(SourceId::new(source, id))
}

/// Find the source id entry for a given source, if present.
#[must_use]
pub fn find_source_id<'a>(source_ids: &'a [SourceId], source: Source) -> Option<&'a SourceId> {
    source_ids.iter().find(|sid| sid.source == source)
}

/// Find the source id entry for a given source and return it encoded.
#[must_use]
pub fn find_source_id_value(source_ids: &[SourceId], source: Source) -> Option<String> {
    find_source_id(source_ids, source).map(SourceId::to_value)
}
