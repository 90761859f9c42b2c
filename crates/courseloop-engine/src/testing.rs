//! Shared test fixtures.

use chrono::{TimeZone, Utc};

use courseloop_core::{
    AccountConfig, Course, CourseId, CourseStatus, CourseSupportType, Member, MemberId,
    MemberStatus, Participant, ParticipantId, ParticipantStatus, Source, SourceId,
};

use crate::source::{CourseSource, ParticipantSource};

pub(crate) fn config() -> AccountConfig {
    let mut config = AccountConfig::new("apf");
    config.name_prefix = "Test".to_string();
    config
}

pub(crate) fn course() -> Course {
    let open = Utc.with_ymd_and_hms(2023, 3, 9, 0, 0, 0).unwrap();
    Course {
        id: CourseId::new(),
        slug: "2023_03_learn_to_be_a_dancer".to_string(),
        status: CourseStatus::Pending,
        source_ids: vec![SourceId::new(Source::Crm, "c-src-1")],
        support_type: CourseSupportType::Facilitated,
        name: "Learn to be a dancer".to_string(),
        date_open: Some(open),
        date_closed: None,
        year_month_open: Some("2023-03".to_string()),
        account_owner: "apf".to_string(),
    }
}

pub(crate) fn member() -> Member {
    Member {
        id: MemberId::new(),
        source_ids: vec![SourceId::new(Source::Crm, "m-src-1")],
        status: MemberStatus::Active,
        name: "June Brown".to_string(),
        email: "june@example.com".to_string(),
        organisation_name: "Brown Inc".to_string(),
        account_owner: "apf".to_string(),
    }
}

pub(crate) fn participant() -> Participant {
    let course = course();
    let member = member();
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

pub(crate) fn course_source() -> CourseSource {
    CourseSource {
        id: "c-src-1".to_string(),
        status: "scheduled".to_string(),
        name: "Learn to be a dancer".to_string(),
        date_open: Some(Utc.with_ymd_and_hms(2023, 3, 9, 0, 0, 0).unwrap()),
        date_closed: None,
    }
}

pub(crate) fn participant_source() -> ParticipantSource {
    ParticipantSource {
        id: "p-src-1".to_string(),
        course_id: "c-src-1".to_string(),
        status: "confirmed".to_string(),
    }
}
