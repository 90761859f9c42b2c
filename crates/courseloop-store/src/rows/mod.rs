//! Per-entity row schemas
//!
//! The only place persistence attributes are produced or consumed. Every
//! attribute is entity-prefixed (`Course_Slug`, `Participant_Status`);
//! secondary indexes key on these materialized attributes directly, so a
//! schema change here is a schema change everywhere.

pub mod course;
pub mod participant;

use chrono::{DateTime, TimeZone, Utc};

use courseloop_core::source::{parse_source_id_value, Source, SourceId};
use courseloop_core::{ReconcileError, Result};

use crate::item::Item;

/// The row's ownership column. Written once per row; the course overlay on a
/// participant row does not duplicate it.
pub const ATTR_ACCOUNT_OWNER: &str = "AccountOwner";

/// The attribute holding one source's combined id value, e.g.
/// `Course_SourceIdCRM`.
#[must_use]
pub fn source_id_attr(entity_prefix: &str, source: Source) -> String {
    format!("{entity_prefix}_SourceId{}", source.as_str())
}

/// Write one attribute per tracked source holding the combined value.
fn write_source_ids(item: &mut Item, entity_prefix: &str, source_ids: &[SourceId]) {
    for source in Source::all() {
        let attr = source_id_attr(entity_prefix, *source);
        let value = source_ids
            .iter()
            .find(|sid| sid.source == *source)
            .map(SourceId::to_value);
        item.set_opt_string(attr, value);
    }
}

/// Read back every tracked source's combined value, in enumeration order.
fn read_source_ids(item: &Item, entity_prefix: &str) -> Result<Vec<SourceId>> {
    let mut source_ids = Vec::new();
    for source in Source::all() {
        let attr = source_id_attr(entity_prefix, *source);
        if let Some(value) = item.opt_string(&attr) {
            let sid = parse_source_id_value(value)
                .map_err(|e| ReconcileError::source_invalid(format!("{attr}: {e}")))?;
            source_ids.push(sid);
        }
    }
    Ok(source_ids)
}

fn write_opt_timestamp(item: &mut Item, attr: &str, ts: Option<DateTime<Utc>>) {
    item.set_opt_number(attr, ts.map(|t| t.timestamp_millis()));
}

fn read_opt_timestamp(item: &Item, attr: &str) -> Result<Option<DateTime<Utc>>> {
    match item.opt_number(attr) {
        None => Ok(None),
        Some(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(Some)
            .ok_or_else(|| {
                ReconcileError::source_invalid(format!("{attr}: {millis} is not a timestamp"))
            }),
    }
}

/// Parse a stored enum or id attribute, mapping failure to `SourceInvalid`.
fn parse_attr<T>(item: &Item, attr: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    item.string(attr)?
        .parse()
        .map_err(|e: T::Err| ReconcileError::source_invalid(format!("{attr}: {e}")))
}
