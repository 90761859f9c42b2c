//! Request DTOs
//!
//! The validated shapes commands and queries accept. Structural validation
//! (non-empty, well-formed email) happens here via derive; semantic parsing
//! of the combined source value happens in the services.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use courseloop_core::source::check_external_id;
use courseloop_core::{Member, MemberId, MemberStatus, ReconcileError, Result, SourceId};

use crate::identifier::{CourseIdentifier, ParticipantIdentifier};

/// Run validation and map failures into the request-invalid error.
pub(crate) fn validate(request: &impl Validate) -> Result<()> {
    request
        .validate()
        .map_err(|e| ReconcileError::request_invalid(e.to_string()))
}

/// Create, update or upsert a course from its source record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCourseRequest {
    /// Combined `SOURCE#externalId` value naming the source record.
    #[validate(length(min = 1))]
    pub id_source_value: String,
}

/// Look a course up by any of its identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct FindCourseRequest {
    #[serde(flatten)]
    pub identifier: CourseIdentifier,
}

/// The member a participant enrols, resolved upstream and supplied whole.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub id: MemberId,

    pub status: MemberStatus,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub organisation_name: String,

    #[serde(default)]
    #[validate(custom(function = valid_source_ids))]
    pub source_ids: Vec<SourceId>,
}

/// Every carried external id must survive the combined-value encoding.
fn valid_source_ids(source_ids: &[SourceId]) -> std::result::Result<(), ValidationError> {
    for source_id in source_ids {
        if check_external_id(&source_id.id).is_err() {
            return Err(ValidationError::new("source_id"));
        }
    }
    Ok(())
}

impl MemberPayload {
    /// Stamp the payload into a domain member owned by this account.
    #[must_use]
    pub fn into_member(self, account_owner: &str) -> Member {
        Member {
            id: self.id,
            source_ids: self.source_ids,
            status: self.status,
            name: self.name,
            email: self.email,
            organisation_name: self.organisation_name,
            account_owner: account_owner.to_string(),
        }
    }
}

/// Create, update or upsert a participant from its source record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertParticipantRequest {
    /// Combined `SOURCE#externalId` value naming the source record.
    #[validate(length(min = 1))]
    pub id_source_value: String,

    /// The enrolled member, resolved by the upstream member service.
    #[validate(nested)]
    pub member: MemberPayload,
}

/// Look a participant up by any of its identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct FindParticipantRequest {
    #[serde(flatten)]
    pub identifier: ParticipantIdentifier,
}
