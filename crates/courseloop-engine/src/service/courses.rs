//! Course reconciliation service.

use std::sync::Arc;

use tracing::{info, instrument};

use courseloop_core::envelope::ResponseEvent;
use courseloop_core::source::parse_source_id_value;
use courseloop_core::{
    AccountConfig, Course, ReconcileError, ResponsePayload, Result, SourceId,
};

use crate::identifier::{CourseIdentifier, CourseLookup};
use crate::mapper::{course_from_source, merge_course};
use crate::repository::CourseRepository;
use crate::requests::{self, UpsertCourseRequest};
use crate::service::tolerate_not_found;
use crate::source::{CourseSource, CourseSourceReader};

/// Envelope tag for courses.
const ENTITY_TAG: &str = "course";

/// Reconciles course records from external sources against the store.
pub struct CourseService {
    repository: Arc<CourseRepository>,
    source_reader: Arc<dyn CourseSourceReader>,
    config: AccountConfig,
}

impl CourseService {
    pub fn new(
        repository: Arc<CourseRepository>,
        source_reader: Arc<dyn CourseSourceReader>,
        config: AccountConfig,
    ) -> Self {
        Self {
            repository,
            source_reader,
            config,
        }
    }

    /// Parse and gate the request's source reference.
    fn accepted_source_id(&self, value: &str) -> Result<SourceId> {
        let source_id = parse_source_id_value(value)?;
        if !self.config.accepts_source(source_id.source) {
            return Err(ReconcileError::request_invalid(format!(
                "source {} is not configured for this account",
                source_id.source
            )));
        }
        Ok(source_id)
    }

    /// Fetch the source record and the existing course side by side.
    async fn fetch_pair(
        &self,
        source_id: &SourceId,
    ) -> Result<(Option<CourseSource>, Option<Course>)> {
        let (record, existing) = tokio::join!(
            self.source_reader.find_course(source_id.source, &source_id.id),
            self.repository.find_by_source_id(source_id),
        );
        Ok((record?, tolerate_not_found(existing)?))
    }

    /// Create a course from its source record.
    ///
    /// The source record must exist and no course may already hold this
    /// source reference. Never reads the existing course's attributes.
    #[instrument(skip(self, request), fields(id_source_value = %request.id_source_value))]
    pub async fn create(&self, request: &UpsertCourseRequest) -> Result<Course> {
        requests::validate(request)?;
        let source_id = self.accepted_source_id(&request.id_source_value)?;
        let (record, existing) = self.fetch_pair(&source_id).await?;

        let record = record.ok_or_else(|| {
            ReconcileError::not_found(format!("no source course for {}", request.id_source_value))
        })?;
        if existing.is_some() {
            return Err(ReconcileError::conflict(format!(
                "course already exists for {}",
                request.id_source_value
            )));
        }

        let course = course_from_source(&record, source_id.source, &self.config)?;
        self.repository.save(&course).await?;
        info!(course_id = %course.id, slug = %course.slug, "course created");
        Ok(course)
    }

    /// Update a course from its source record.
    ///
    /// Both the source record and the existing course must exist. A merge
    /// that changes nothing is rejected with the benign `ItemUpdate` signal
    /// and writes nothing.
    #[instrument(skip(self, request), fields(id_source_value = %request.id_source_value))]
    pub async fn update(&self, request: &UpsertCourseRequest) -> Result<Course> {
        requests::validate(request)?;
        let source_id = self.accepted_source_id(&request.id_source_value)?;
        let (record, existing) = self.fetch_pair(&source_id).await?;

        let record = record.ok_or_else(|| {
            ReconcileError::not_found(format!("no source course for {}", request.id_source_value))
        })?;
        let existing = existing.ok_or_else(|| {
            ReconcileError::not_found(format!("no course for {}", request.id_source_value))
        })?;

        let merged = merge_course(&existing, &record)?;
        if merged == existing {
            return Err(ReconcileError::item_update(format!(
                "course {} is already up to date",
                existing.id
            )));
        }
        self.repository.save(&merged).await?;
        info!(course_id = %merged.id, "course updated");
        Ok(merged)
    }

    /// Create or update, whichever the store's current state calls for.
    ///
    /// A no-op update is reported as a `no-change` outcome, not a failure.
    #[instrument(skip(self, request), fields(id_source_value = %request.id_source_value))]
    pub async fn upsert(&self, request: &UpsertCourseRequest) -> Result<ResponsePayload<Course>> {
        requests::validate(request)?;
        let source_id = self.accepted_source_id(&request.id_source_value)?;
        let existing = tolerate_not_found(self.repository.find_by_source_id(&source_id).await)?;

        match existing {
            None => {
                let created = self.create(request).await?;
                Ok(ResponsePayload::success(
                    ResponseEvent::Created,
                    ENTITY_TAG,
                    created,
                ))
            }
            Some(current) => match self.update(request).await {
                Ok(updated) => Ok(ResponsePayload::success(
                    ResponseEvent::Updated,
                    ENTITY_TAG,
                    updated,
                )),
                Err(e) if e.is_item_update() => Ok(ResponsePayload::no_change(ENTITY_TAG, current)),
                Err(e) => Err(e),
            },
        }
    }

    /// Look the source's own course record up by combined source value.
    ///
    /// Answers with the record as the source reports it, untransformed.
    /// Source records have no other address, so this takes the combined
    /// value directly rather than an identifier descriptor.
    #[instrument(skip(self))]
    pub async fn find_source(&self, id_source_value: &str) -> Result<CourseSource> {
        let source_id = self.accepted_source_id(id_source_value)?;
        let record = self
            .source_reader
            .find_course(source_id.source, &source_id.id)
            .await?;
        record.ok_or_else(|| {
            ReconcileError::not_found(format!("no source course for {id_source_value}"))
        })
    }

    /// Look a course up by any of its identifiers.
    #[instrument(skip(self, identifier))]
    pub async fn find(&self, identifier: &CourseIdentifier) -> Result<Course> {
        match identifier.resolve()? {
            CourseLookup::Id(id) => self.repository.find_by_id(id).await,
            CourseLookup::SourceValue(source_id) => {
                self.repository.find_by_source_id(&source_id).await
            }
            CourseLookup::Slug(slug) => self.repository.find_by_slug(&slug).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySourceReader;
    use crate::testing;
    use courseloop_core::envelope::ResponseOutcome;
    use courseloop_core::{CourseStatus, Source};
    use courseloop_store::MemoryStoreClient;

    struct Harness {
        service: CourseService,
        client: Arc<MemoryStoreClient>,
        reader: Arc<MemorySourceReader>,
        table: String,
    }

    fn harness() -> Harness {
        let client = Arc::new(MemoryStoreClient::new());
        let reader = Arc::new(MemorySourceReader::new());
        let config = testing::config();
        let repository = Arc::new(CourseRepository::new(client.clone(), &config));
        let table = repository.table().to_string();
        let service = CourseService::new(repository, reader.clone(), config);
        Harness {
            service,
            client,
            reader,
            table,
        }
    }

    fn request() -> UpsertCourseRequest {
        UpsertCourseRequest {
            id_source_value: "CRM#c-src-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_writes_exactly_one_row() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());

        let course = h.service.create(&request()).await.unwrap();
        assert_eq!(course.slug, "2023_03_learn_to_be_a_dancer");
        assert_eq!(h.client.row_count(&h.table), 1);
    }

    #[tokio::test]
    async fn test_create_without_source_record_is_not_found() {
        let h = harness();
        let err = h.service.create(&request()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(h.client.row_count(&h.table), 0);
    }

    #[tokio::test]
    async fn test_create_twice_is_a_conflict() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        h.service.create(&request()).await.unwrap();

        let err = h.service.create(&request()).await.unwrap_err();
        assert!(matches!(err, ReconcileError::ItemConflict { .. }));
        assert_eq!(h.client.row_count(&h.table), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_source_value() {
        let h = harness();
        let bad = UpsertCourseRequest {
            id_source_value: "no-separator".to_string(),
        };
        let err = h.service.create(&bad).await.unwrap_err();
        assert!(matches!(err, ReconcileError::RequestInvalid { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_unconfigured_source() {
        let h = harness();
        let community = UpsertCourseRequest {
            id_source_value: "COMMUNITY#c-9".to_string(),
        };
        let err = h.service.create(&community).await.unwrap_err();
        assert!(matches!(err, ReconcileError::RequestInvalid { .. }));
    }

    #[tokio::test]
    async fn test_update_folds_source_changes_in() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        let created = h.service.create(&request()).await.unwrap();

        let mut record = testing::course_source();
        record.status = "open".to_string();
        h.reader.seed_course(Source::Crm, record);

        let updated = h.service.update(&request()).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, CourseStatus::Active);
        assert_eq!(h.client.row_count(&h.table), 1);
    }

    #[tokio::test]
    async fn test_update_without_existing_course_is_not_found() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        let err = h.service.update(&request()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_with_nothing_changed_is_a_benign_no_op() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        h.service.create(&request()).await.unwrap();

        let err = h.service.update(&request()).await.unwrap_err();
        assert!(err.is_item_update());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_reports_no_change() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());

        let first = h.service.upsert(&request()).await.unwrap();
        assert_eq!(first.event, ResponseEvent::Created);
        assert_eq!(first.outcome, ResponseOutcome::Success);
        assert_eq!(first.entity, "course");

        let second = h.service.upsert(&request()).await.unwrap();
        assert_eq!(second.event, ResponseEvent::Updated);
        assert_eq!(second.outcome, ResponseOutcome::NoChange);
        assert_eq!(second.detail, first.detail);
        assert_eq!(h.client.row_count(&h.table), 1);
    }

    #[tokio::test]
    async fn test_upsert_updates_when_the_source_moved() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        h.service.upsert(&request()).await.unwrap();

        let mut record = testing::course_source();
        record.status = "closed".to_string();
        h.reader.seed_course(Source::Crm, record);

        let result = h.service.upsert(&request()).await.unwrap();
        assert_eq!(result.event, ResponseEvent::Updated);
        assert_eq!(result.outcome, ResponseOutcome::Success);
        assert_eq!(result.detail.status, CourseStatus::Closed);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_and_writes_nothing() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        h.client.fail_next("socket timeout");

        let err = h.service.create(&request()).await.unwrap_err();
        assert!(matches!(err, ReconcileError::Repository { .. }));
        assert_eq!(h.client.row_count(&h.table), 0);
    }

    #[tokio::test]
    async fn test_find_dispatches_every_identifier_kind() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());
        let course = h.service.create(&request()).await.unwrap();

        let by_id = h
            .service
            .find(&CourseIdentifier::Id(course.id.to_string()))
            .await
            .unwrap();
        let by_source = h
            .service
            .find(&CourseIdentifier::IdSourceValue("CRM#c-src-1".to_string()))
            .await
            .unwrap();
        let by_slug = h
            .service
            .find(&CourseIdentifier::Slug(course.slug.clone()))
            .await
            .unwrap();
        assert_eq!(by_id, course);
        assert_eq!(by_source, course);
        assert_eq!(by_slug, course);
    }

    #[tokio::test]
    async fn test_find_source_returns_the_raw_record() {
        let h = harness();
        h.reader.seed_course(Source::Crm, testing::course_source());

        let record = h.service.find_source("CRM#c-src-1").await.unwrap();
        assert_eq!(record, testing::course_source());

        let err = h.service.find_source("CRM#c-src-9").await.unwrap_err();
        assert!(err.is_not_found());
        let err = h.service.find_source("no-separator").await.unwrap_err();
        assert!(matches!(err, ReconcileError::RequestInvalid { .. }));
    }

    #[tokio::test]
    async fn test_find_missing_course_is_not_found() {
        let h = harness();
        let err = h
            .service
            .find(&CourseIdentifier::Slug("2023_03_missing".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
