//! Course row schema
//!
//! A course row keys on its own id for both key attributes. The same
//! `Course_*` attribute set doubles as the overlay on participant rows.

use courseloop_core::{Course, Result, Source};

use crate::item::Item;
use crate::rows::{
    parse_attr, read_opt_timestamp, read_source_ids, write_opt_timestamp, write_source_ids,
    ATTR_ACCOUNT_OWNER,
};

const PREFIX: &str = "Course";

pub const ATTR_ID: &str = "Course_Id";
pub const ATTR_SLUG: &str = "Course_Slug";
pub const ATTR_STATUS: &str = "Course_Status";
pub const ATTR_SUPPORT_TYPE: &str = "Course_SupportType";
pub const ATTR_NAME: &str = "Course_Name";
pub const ATTR_DATE_OPEN: &str = "Course_DateOpen";
pub const ATTR_DATE_CLOSED: &str = "Course_DateClosed";
pub const ATTR_YEAR_MONTH_OPEN: &str = "Course_YearMonthOpen";

/// The attribute a source-id index for courses keys on.
#[must_use]
pub fn source_id_attr(source: Source) -> String {
    super::source_id_attr(PREFIX, source)
}

/// Key fragment for a course row: both keys are the course id.
#[must_use]
pub fn to_keys(course: &Course) -> Item {
    let id = course.id.to_string();
    Item::new(id.clone(), id)
}

/// Write the `Course_*` attribute set onto an item.
///
/// Used for the course's own row and as the overlay on participant rows;
/// the ownership column is deliberately not part of the overlay.
pub fn write_overlay(item: &mut Item, course: &Course) {
    item.set_string(ATTR_ID, course.id.to_string());
    item.set_string(ATTR_SLUG, &course.slug);
    item.set_string(ATTR_STATUS, course.status.as_str());
    item.set_string(ATTR_SUPPORT_TYPE, course.support_type.as_str());
    item.set_string(ATTR_NAME, &course.name);
    write_opt_timestamp(item, ATTR_DATE_OPEN, course.date_open);
    write_opt_timestamp(item, ATTR_DATE_CLOSED, course.date_closed);
    item.set_opt_string(ATTR_YEAR_MONTH_OPEN, course.year_month_open.as_deref());
    write_source_ids(item, PREFIX, &course.source_ids);
}

/// Build the full course row.
#[must_use]
pub fn to_item(course: &Course) -> Item {
    let mut item = to_keys(course);
    write_overlay(&mut item, course);
    item.set_string(ATTR_ACCOUNT_OWNER, &course.account_owner);
    item
}

/// Read a course back out of a row's `Course_*` attributes.
///
/// Works on the course's own row and on a participant row's overlay alike;
/// both carry the account owner in the shared ownership column.
pub fn from_item(item: &Item) -> Result<Course> {
    Ok(Course {
        id: parse_attr(item, ATTR_ID)?,
        slug: item.string(ATTR_SLUG)?.to_string(),
        status: parse_attr(item, ATTR_STATUS)?,
        source_ids: read_source_ids(item, PREFIX)?,
        support_type: parse_attr(item, ATTR_SUPPORT_TYPE)?,
        name: item.string(ATTR_NAME)?.to_string(),
        date_open: read_opt_timestamp(item, ATTR_DATE_OPEN)?,
        date_closed: read_opt_timestamp(item, ATTR_DATE_CLOSED)?,
        year_month_open: item.opt_string(ATTR_YEAR_MONTH_OPEN).map(String::from),
        account_owner: item.string(ATTR_ACCOUNT_OWNER)?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use courseloop_core::source::SourceId;
    use courseloop_core::{CourseId, CourseStatus, CourseSupportType, ReconcileError};

    fn course() -> Course {
        let open = Utc.with_ymd_and_hms(2023, 3, 9, 0, 0, 0).unwrap();
        Course {
            id: CourseId::new(),
            slug: "2023_03_learn_to_be_a_dancer".to_string(),
            status: CourseStatus::Pending,
            source_ids: vec![SourceId::new(Source::Crm, "5008s1234519CjBBHU")],
            support_type: CourseSupportType::Facilitated,
            name: "Learn to be a dancer".to_string(),
            date_open: Some(open),
            date_closed: None,
            year_month_open: Some("2023-03".to_string()),
            account_owner: "apf".to_string(),
        }
    }

    #[test]
    fn test_keys_are_the_course_id() {
        let course = course();
        let item = to_item(&course);
        let id = course.id.to_string();
        assert_eq!(item.primary_key(), Some(id.as_str()));
        assert_eq!(item.sort_key(), Some(id.as_str()));
    }

    #[test]
    fn test_roundtrip_is_lossless() {
        let course = course();
        let read = from_item(&to_item(&course)).unwrap();
        assert_eq!(read, course);
    }

    #[test]
    fn test_index_attributes_are_materialized() {
        let course = course();
        let item = to_item(&course);
        assert_eq!(item.opt_string(ATTR_SLUG), Some(course.slug.as_str()));
        assert_eq!(
            item.opt_string(&source_id_attr(Source::Crm)),
            Some("CRM#5008s1234519CjBBHU")
        );
    }

    #[test]
    fn test_missing_status_rejected() {
        let course = course();
        let mut item = to_item(&course);
        item.set_opt_string(ATTR_STATUS, None::<String>);
        let err = from_item(&item).unwrap_err();
        assert!(matches!(err, ReconcileError::SourceInvalid { .. }));
    }

    #[test]
    fn test_corrupt_id_rejected() {
        let course = course();
        let mut item = to_item(&course);
        item.set_string(ATTR_ID, "not-a-uuid");
        assert!(from_item(&item).is_err());
    }
}
