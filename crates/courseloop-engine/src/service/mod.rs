//! Reconciliation services
//!
//! One service per entity kind. Each owns the decision logic for create,
//! update and upsert plus the identifier-dispatched find; repositories and
//! source readers are injected collaborators.

mod courses;
mod participants;

pub use courses::CourseService;
pub use participants::ParticipantService;

use courseloop_core::Result;

/// Treat a not-found lookup as an answer instead of a failure.
pub(crate) fn tolerate_not_found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseloop_core::ReconcileError;

    #[test]
    fn test_tolerate_not_found() {
        assert_eq!(tolerate_not_found(Ok(1)).unwrap(), Some(1));
        assert_eq!(
            tolerate_not_found::<i32>(Err(ReconcileError::not_found("x")))
                .unwrap(),
            None
        );
        assert!(tolerate_not_found::<i32>(Err(ReconcileError::request_invalid("x"))).is_err());
    }
}
