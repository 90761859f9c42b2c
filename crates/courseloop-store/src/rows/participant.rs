//! Participant row schema
//!
//! A participant row keys on `(course id, participant id)` and carries three
//! attribute sets: its own `Participant_*` fields, the parent course's
//! `Course_*` overlay and the member's `Member_*` overlay, so a single read
//! yields the fully denormalized entity.

use courseloop_core::{Member, Participant, Result, Source};

use crate::item::Item;
use crate::rows::{
    course, parse_attr, read_source_ids, write_source_ids, ATTR_ACCOUNT_OWNER,
};

const PREFIX: &str = "Participant";
const MEMBER_PREFIX: &str = "Member";

pub const ATTR_ID: &str = "Participant_Id";
pub const ATTR_MEMBER_ID: &str = "Participant_MemberId";
pub const ATTR_COURSE_ID: &str = "Participant_CourseId";
pub const ATTR_SOURCE_ORIGIN: &str = "Participant_SourceOrigin";
pub const ATTR_STATUS: &str = "Participant_Status";

pub const ATTR_MEMBER_ROW_ID: &str = "Member_Id";
pub const ATTR_MEMBER_STATUS: &str = "Member_Status";
pub const ATTR_MEMBER_NAME: &str = "Member_Name";
pub const ATTR_MEMBER_EMAIL: &str = "Member_Email";
pub const ATTR_MEMBER_ORGANISATION_NAME: &str = "Member_OrganisationName";

/// The attribute a source-id index for participants keys on.
#[must_use]
pub fn source_id_attr(source: Source) -> String {
    super::source_id_attr(PREFIX, source)
}

/// Key fragment for a participant row: parent course id, then own id.
#[must_use]
pub fn to_keys(participant: &Participant) -> Item {
    Item::new(
        participant.course_id.to_string(),
        participant.id.to_string(),
    )
}

fn write_member_overlay(item: &mut Item, member: &Member) {
    item.set_string(ATTR_MEMBER_ROW_ID, member.id.to_string());
    item.set_string(ATTR_MEMBER_STATUS, member.status.as_str());
    item.set_string(ATTR_MEMBER_NAME, &member.name);
    item.set_string(ATTR_MEMBER_EMAIL, &member.email);
    item.set_string(ATTR_MEMBER_ORGANISATION_NAME, &member.organisation_name);
    write_source_ids(item, MEMBER_PREFIX, &member.source_ids);
}

fn read_member_overlay(item: &Item) -> Result<Member> {
    Ok(Member {
        id: parse_attr(item, ATTR_MEMBER_ROW_ID)?,
        source_ids: read_source_ids(item, MEMBER_PREFIX)?,
        status: parse_attr(item, ATTR_MEMBER_STATUS)?,
        name: item.string(ATTR_MEMBER_NAME)?.to_string(),
        email: item.string(ATTR_MEMBER_EMAIL)?.to_string(),
        organisation_name: item.string(ATTR_MEMBER_ORGANISATION_NAME)?.to_string(),
        account_owner: item.string(ATTR_ACCOUNT_OWNER)?.to_string(),
    })
}

/// Build the full participant row, overlays included.
#[must_use]
pub fn to_item(participant: &Participant) -> Item {
    let mut item = to_keys(participant);
    item.set_string(ATTR_ID, participant.id.to_string());
    item.set_string(ATTR_MEMBER_ID, participant.member_id.to_string());
    item.set_string(ATTR_COURSE_ID, participant.course_id.to_string());
    item.set_opt_string(
        ATTR_SOURCE_ORIGIN,
        participant.source_origin.map(|s| s.as_str()),
    );
    item.set_string(ATTR_STATUS, participant.status.as_str());
    write_source_ids(&mut item, PREFIX, &participant.source_ids);
    item.set_string(ATTR_ACCOUNT_OWNER, &participant.account_owner);
    course::write_overlay(&mut item, &participant.course);
    write_member_overlay(&mut item, &participant.member);
    item
}

/// Read a participant, its course overlay and its member overlay out of one
/// row.
pub fn from_item(item: &Item) -> Result<Participant> {
    let source_origin = match item.opt_string(ATTR_SOURCE_ORIGIN) {
        Some(_) => Some(parse_attr(item, ATTR_SOURCE_ORIGIN)?),
        None => None,
    };
    Ok(Participant {
        id: parse_attr(item, ATTR_ID)?,
        member_id: parse_attr(item, ATTR_MEMBER_ID)?,
        course_id: parse_attr(item, ATTR_COURSE_ID)?,
        source_origin,
        source_ids: read_source_ids(item, PREFIX)?,
        status: parse_attr(item, ATTR_STATUS)?,
        account_owner: item.string(ATTR_ACCOUNT_OWNER)?.to_string(),
        course: course::from_item(item)?,
        member: read_member_overlay(item)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use courseloop_core::source::SourceId;
    use courseloop_core::{
        Course, CourseId, CourseStatus, CourseSupportType, MemberId, MemberStatus, ParticipantId,
        ParticipantStatus, ReconcileError,
    };

    fn participant() -> Participant {
        let open = Utc.with_ymd_and_hms(2023, 3, 9, 0, 0, 0).unwrap();
        let course = Course {
            id: CourseId::new(),
            slug: "2023_03_learn_to_be_a_dancer".to_string(),
            status: CourseStatus::Active,
            source_ids: vec![SourceId::new(Source::Crm, "c-src-1")],
            support_type: CourseSupportType::Facilitated,
            name: "Learn to be a dancer".to_string(),
            date_open: Some(open),
            date_closed: None,
            year_month_open: Some("2023-03".to_string()),
            account_owner: "apf".to_string(),
        };
        let member = Member {
            id: MemberId::new(),
            source_ids: vec![SourceId::new(Source::Crm, "m-src-1")],
            status: MemberStatus::Active,
            name: "June Brown".to_string(),
            email: "june@example.com".to_string(),
            organisation_name: "Brown Inc".to_string(),
            account_owner: "apf".to_string(),
        };
        Participant {
            id: ParticipantId::new(),
            member_id: member.id,
            course_id: course.id,
            source_origin: Some(Source::Crm),
            source_ids: vec![SourceId::new(Source::Crm, "p-src-1")],
            status: ParticipantStatus::Registered,
            account_owner: "apf".to_string(),
            course,
            member,
        }
    }

    #[test]
    fn test_keys_are_course_then_participant() {
        let p = participant();
        let item = to_item(&p);
        assert_eq!(item.primary_key(), Some(p.course_id.to_string().as_str()));
        assert_eq!(item.sort_key(), Some(p.id.to_string().as_str()));
    }

    #[test]
    fn test_roundtrip_is_lossless() {
        let p = participant();
        let read = from_item(&to_item(&p)).unwrap();
        assert_eq!(read, p);
    }

    #[test]
    fn test_roundtrip_without_source_origin() {
        let mut p = participant();
        p.source_origin = None;
        let read = from_item(&to_item(&p)).unwrap();
        assert_eq!(read.source_origin, None);
    }

    #[test]
    fn test_ownership_column_is_the_participants() {
        let mut p = participant();
        p.course.account_owner = p.account_owner.clone();
        let item = to_item(&p);
        assert_eq!(
            item.opt_string(ATTR_ACCOUNT_OWNER),
            Some(p.account_owner.as_str())
        );
    }

    #[test]
    fn test_source_id_attribute_materialized() {
        let p = participant();
        let item = to_item(&p);
        assert_eq!(
            item.opt_string(&source_id_attr(Source::Crm)),
            Some("CRM#p-src-1")
        );
    }

    #[test]
    fn test_missing_member_overlay_rejected() {
        let p = participant();
        let mut item = to_item(&p);
        item.set_opt_string(ATTR_MEMBER_EMAIL, None::<String>);
        let err = from_item(&item).unwrap_err();
        assert!(matches!(err, ReconcileError::SourceInvalid { .. }));
    }
}
