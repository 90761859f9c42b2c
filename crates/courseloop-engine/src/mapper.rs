//! Source-to-domain transforms
//!
//! The single place deciding field-level precedence. `*_from_source` builds
//! a fresh entity; `merge_*` folds a source record into an existing one,
//! preserving everything the source does not own: canonical ids, source-id
//! history, ownership and the support model.

use courseloop_core::slug::{course_slug, year_month};
use courseloop_core::{
    AccountConfig, Course, CourseId, CourseStatus, Member, Participant, ParticipantId,
    ParticipantStatus, ReconcileError, Result, Source, SourceId,
};

use crate::source::{CourseSource, ParticipantSource};

/// Map the source's course status vocabulary onto ours.
fn course_status_from_source(status: &str) -> Result<CourseStatus> {
    match status {
        "scheduled" => Ok(CourseStatus::Pending),
        "open" => Ok(CourseStatus::Active),
        "closed" => Ok(CourseStatus::Closed),
        other => Err(ReconcileError::source_invalid(format!(
            "unknown source course status: {other}"
        ))),
    }
}

/// Map the source's participant status vocabulary onto ours.
fn participant_status_from_source(status: &str) -> Result<ParticipantStatus> {
    match status {
        "pending" => Ok(ParticipantStatus::Pending),
        "confirmed" => Ok(ParticipantStatus::Registered),
        "cancelled" => Ok(ParticipantStatus::Cancelled),
        other => Err(ReconcileError::source_invalid(format!(
            "unknown source participant status: {other}"
        ))),
    }
}

fn check_course_shape(record: &CourseSource) -> Result<()> {
    if record.id.is_empty() {
        return Err(ReconcileError::source_invalid("course record has no id"));
    }
    if record.name.is_empty() {
        return Err(ReconcileError::source_invalid("course record has no name"));
    }
    Ok(())
}

/// Seed the source-id entry for a freshly reconciled entity. The record's id
/// must survive the combined-value encoding, so it goes through the checked
/// constructor.
fn seed_source_id(source: Source, record_id: &str) -> Result<SourceId> {
    SourceId::try_new(source, record_id).map_err(|_| {
        ReconcileError::source_invalid(format!(
            "record id is not usable as an external id: {record_id}"
        ))
    })
}

/// Build a fresh course from a source record.
///
/// Generates the canonical id, seeds the source-id list with this record's
/// entry, derives slug and year-month and stamps the account-owned fields
/// from configuration.
pub fn course_from_source(
    record: &CourseSource,
    source: Source,
    config: &AccountConfig,
) -> Result<Course> {
    check_course_shape(record)?;
    Ok(Course {
        id: CourseId::new(),
        slug: course_slug(&record.name, record.date_open),
        status: course_status_from_source(&record.status)?,
        source_ids: vec![seed_source_id(source, &record.id)?],
        support_type: config.default_support_type,
        name: record.name.clone(),
        date_open: record.date_open,
        date_closed: record.date_closed,
        year_month_open: record.date_open.map(year_month),
        account_owner: config.account_owner.clone(),
    })
}

/// Fold a source record into an existing course.
///
/// Canonical id, source-id history, support model and ownership survive;
/// status, name and dates are overwritten and the slug re-derived.
pub fn merge_course(existing: &Course, record: &CourseSource) -> Result<Course> {
    check_course_shape(record)?;
    Ok(Course {
        id: existing.id,
        slug: course_slug(&record.name, record.date_open),
        status: course_status_from_source(&record.status)?,
        source_ids: existing.source_ids.clone(),
        support_type: existing.support_type,
        name: record.name.clone(),
        date_open: record.date_open,
        date_closed: record.date_closed,
        year_month_open: record.date_open.map(year_month),
        account_owner: existing.account_owner.clone(),
    })
}

fn check_participant_shape(record: &ParticipantSource) -> Result<()> {
    if record.id.is_empty() {
        return Err(ReconcileError::source_invalid(
            "participant record has no id",
        ));
    }
    if record.course_id.is_empty() {
        return Err(ReconcileError::source_invalid(
            "participant record has no course reference",
        ));
    }
    Ok(())
}

/// Build a fresh participant from a source record, its parent course and
/// the member it enrols.
pub fn participant_from_source(
    record: &ParticipantSource,
    course: Course,
    member: Member,
    source: Source,
    config: &AccountConfig,
) -> Result<Participant> {
    check_participant_shape(record)?;
    Ok(Participant {
        id: ParticipantId::new(),
        member_id: member.id,
        course_id: course.id,
        source_origin: Some(source),
        source_ids: vec![seed_source_id(source, &record.id)?],
        status: participant_status_from_source(&record.status)?,
        account_owner: config.account_owner.clone(),
        course,
        member,
    })
}

/// Fold a source record into an existing participant.
///
/// Only the status is source-owned; ids, overlays and ownership survive.
pub fn merge_participant(
    existing: &Participant,
    record: &ParticipantSource,
) -> Result<Participant> {
    check_participant_shape(record)?;
    Ok(Participant {
        status: participant_status_from_source(&record.status)?,
        ..existing.clone()
    })
}
