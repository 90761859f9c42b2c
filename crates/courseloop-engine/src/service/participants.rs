//! Participant reconciliation service.

use std::sync::Arc;

use tracing::{info, instrument};

use courseloop_core::envelope::ResponseEvent;
use courseloop_core::source::parse_source_id_value;
use courseloop_core::{
    AccountConfig, Participant, ReconcileError, ResponsePayload, Result, SourceId,
};

use crate::identifier::{ParticipantIdentifier, ParticipantLookup};
use crate::mapper::{merge_participant, participant_from_source};
use crate::repository::{CourseRepository, ParticipantRepository};
use crate::requests::{self, UpsertParticipantRequest};
use crate::service::tolerate_not_found;
use crate::source::{ParticipantSource, ParticipantSourceReader};

/// Envelope tag for participants.
const ENTITY_TAG: &str = "participant";

/// Reconciles participant records from external sources against the store.
///
/// Participants are children of courses: creating one requires the parent
/// course to already be reconciled, and the member arrives resolved with the
/// request.
pub struct ParticipantService {
    repository: Arc<ParticipantRepository>,
    courses: Arc<CourseRepository>,
    source_reader: Arc<dyn ParticipantSourceReader>,
    config: AccountConfig,
}

impl ParticipantService {
    pub fn new(
        repository: Arc<ParticipantRepository>,
        courses: Arc<CourseRepository>,
        source_reader: Arc<dyn ParticipantSourceReader>,
        config: AccountConfig,
    ) -> Self {
        Self {
            repository,
            courses,
            source_reader,
            config,
        }
    }

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

    async fn fetch_pair(
        &self,
        source_id: &SourceId,
    ) -> Result<(Option<ParticipantSource>, Option<Participant>)> {
        let (record, existing) = tokio::join!(
            self.source_reader
                .find_participant(source_id.source, &source_id.id),
            self.repository.find_by_source_id(source_id),
        );
        Ok((record?, tolerate_not_found(existing)?))
    }

    /// Create a participant from its source record.
    ///
    /// The source record must exist, no participant may already hold this
    /// source reference, and the parent course must already be reconciled
    /// under the same source.
    #[instrument(skip(self, request), fields(id_source_value = %request.id_source_value))]
    pub async fn create(&self, request: &UpsertParticipantRequest) -> Result<Participant> {
        requests::validate(request)?;
        let source_id = self.accepted_source_id(&request.id_source_value)?;
        let (record, existing) = self.fetch_pair(&source_id).await?;

        let record = record.ok_or_else(|| {
            ReconcileError::not_found(format!(
                "no source participant for {}",
                request.id_source_value
            ))
        })?;
        if existing.is_some() {
            return Err(ReconcileError::conflict(format!(
                "participant already exists for {}",
                request.id_source_value
            )));
        }

        let course_source_id = SourceId::new(source_id.source, record.course_id.clone());
        let course = self.courses.find_by_source_id(&course_source_id).await?;
        let member = request
            .member
            .clone()
            .into_member(&self.config.account_owner);

        let participant =
            participant_from_source(&record, course, member, source_id.source, &self.config)?;
        self.repository.save(&participant).await?;
        info!(
            participant_id = %participant.id,
            course_id = %participant.course_id,
            "participant created"
        );
        Ok(participant)
    }

    /// Update a participant from its source record.
    ///
    /// Both the source record and the existing participant must exist. A
    /// merge that changes nothing is rejected with the benign `ItemUpdate`
    /// signal and writes nothing.
    #[instrument(skip(self, request), fields(id_source_value = %request.id_source_value))]
    pub async fn update(&self, request: &UpsertParticipantRequest) -> Result<Participant> {
        requests::validate(request)?;
        let source_id = self.accepted_source_id(&request.id_source_value)?;
        let (record, existing) = self.fetch_pair(&source_id).await?;

        let record = record.ok_or_else(|| {
            ReconcileError::not_found(format!(
                "no source participant for {}",
                request.id_source_value
            ))
        })?;
        let existing = existing.ok_or_else(|| {
            ReconcileError::not_found(format!("no participant for {}", request.id_source_value))
        })?;

        let merged = merge_participant(&existing, &record)?;
        if merged == existing {
            return Err(ReconcileError::item_update(format!(
                "participant {} is already up to date",
                existing.id
            )));
        }
        self.repository.save(&merged).await?;
        info!(participant_id = %merged.id, "participant updated");
        Ok(merged)
    }

    /// Create or update, whichever the store's current state calls for.
    #[instrument(skip(self, request), fields(id_source_value = %request.id_source_value))]
    pub async fn upsert(
        &self,
        request: &UpsertParticipantRequest,
    ) -> Result<ResponsePayload<Participant>> {
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

    /// Look the source's own participant record up by combined source value.
    ///
    /// Answers with the record as the source reports it, untransformed.
    #[instrument(skip(self))]
    pub async fn find_source(&self, id_source_value: &str) -> Result<ParticipantSource> {
        let source_id = self.accepted_source_id(id_source_value)?;
        let record = self
            .source_reader
            .find_participant(source_id.source, &source_id.id)
            .await?;
        record.ok_or_else(|| {
            ReconcileError::not_found(format!("no source participant for {id_source_value}"))
        })
    }

    /// Look a participant up by any of its identifiers.
    #[instrument(skip(self, identifier))]
    pub async fn find(&self, identifier: &ParticipantIdentifier) -> Result<Participant> {
        match identifier.resolve()? {
            ParticipantLookup::Id(id) => self.repository.find_by_id(id).await,
            ParticipantLookup::SourceValue(source_id) => {
                self.repository.find_by_source_id(&source_id).await
            }
        }
    }
}
