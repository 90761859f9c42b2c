//! Command response envelope
//!
//! Every mutating command answers with the same envelope: what happened
//! (event), how it went (outcome) and the entity as it now stands. The
//! `no-change` outcome is how a benign no-op upsert reports itself without
//! being an error.

use serde::{Deserialize, Serialize};

/// What kind of mutation the command performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseEvent {
    Created,
    Updated,
    Deleted,
}

impl ResponseEvent {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseEvent::Created => "created",
            ResponseEvent::Updated => "updated",
            ResponseEvent::Deleted => "deleted",
        }
    }
}

/// How the mutation went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOutcome {
    Success,
    Failure,
    /// The store already held exactly this state; nothing was written.
    NoChange,
}

impl ResponseOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseOutcome::Success => "success",
            ResponseOutcome::Failure => "failure",
            ResponseOutcome::NoChange => "no-change",
        }
    }
}

/// The envelope a mutating command answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload<T> {
    pub event: ResponseEvent,
    pub outcome: ResponseOutcome,
    /// The entity kind tag, e.g. `"course"`.
    pub entity: String,
    /// The entity as it now stands in the store.
    pub detail: T,
}

impl<T> ResponsePayload<T> {
    /// A successful create or update.
    #[must_use]
    pub fn success(event: ResponseEvent, entity: impl Into<String>, detail: T) -> Self {
        Self {
            event,
            outcome: ResponseOutcome::Success,
            entity: entity.into(),
            detail,
        }
    }

    /// An update that found nothing to change.
    #[must_use]
    pub fn no_change(entity: impl Into<String>, detail: T) -> Self {
        Self {
            event: ResponseEvent::Updated,
            outcome: ResponseOutcome::NoChange,
            entity: entity.into(),
            detail,
        }
    }

    /// A successful deletion.
    #[must_use]
    pub fn deleted(entity: impl Into<String>, detail: T) -> Self {
        Self {
            event: ResponseEvent::Deleted,
            outcome: ResponseOutcome::Success,
            entity: entity.into(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change_serializes_with_dash() {
        let payload = ResponsePayload::no_change("course", "x");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["outcome"], "no-change");
        assert_eq!(json["event"], "updated");
        assert_eq!(json["entity"], "course");
    }

    #[test]
    fn test_success_envelope() {
        let payload = ResponsePayload::success(ResponseEvent::Created, "course", 7);
        assert_eq!(payload.outcome, ResponseOutcome::Success);
        assert_eq!(payload.detail, 7);
    }

    #[test]
    fn test_deleted_helper() {
        let payload = ResponsePayload::deleted("participant", ());
        assert_eq!(payload.event, ResponseEvent::Deleted);
        assert_eq!(payload.outcome, ResponseOutcome::Success);
    }
}
