//! Entity repositories
//!
//! One repository per entity kind, owning that kind's slice of the single
//! table: its logical ids, the indexes it queries and the row schema it maps
//! through. Everything below this layer deals in flat items; everything
//! above deals in entities.

use std::sync::Arc;

use courseloop_core::{
    AccountConfig, Course, CourseId, Participant, ParticipantId, Result, Source, SourceId,
};
use courseloop_store::rows::{course as course_row, participant as participant_row};
use courseloop_store::{EntityStore, IndexRef, StoreClient};

/// Logical id of the single table shared by every entity kind.
const TABLE_ID: &str = "courses";

const SLUG_INDEX: &str = "slug";
const ID_INDEX: &str = "id";

/// Logical id of the per-source combined-value index, e.g. `source-id-crm`.
fn source_index_id(source: Source) -> String {
    format!("source-id-{}", source.as_str().to_lowercase())
}

fn source_index_ids() -> Vec<String> {
    Source::all().iter().map(|s| source_index_id(*s)).collect()
}

/// Course rows: keyed on the course id for both keys, indexed by slug and
/// by combined source value.
pub struct CourseRepository {
    store: EntityStore,
}

impl CourseRepository {
    pub fn new(client: Arc<dyn StoreClient>, config: &AccountConfig) -> Self {
        let mut index_ids = vec![SLUG_INDEX.to_string()];
        index_ids.extend(source_index_ids());
        let index_refs: Vec<&str> = index_ids.iter().map(String::as_str).collect();
        Self {
            store: EntityStore::new(
                client,
                &config.name_prefix,
                "course",
                TABLE_ID,
                &index_refs,
                &[],
            ),
        }
    }

    pub async fn find_by_id(&self, id: CourseId) -> Result<Course> {
        let key = id.to_string();
        let item = self.store.get_one(&key, &key).await?;
        course_row::from_item(&item)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Course> {
        let item = self
            .store
            .query_one(IndexRef::Global(SLUG_INDEX), course_row::ATTR_SLUG, slug)
            .await?;
        course_row::from_item(&item)
    }

    pub async fn find_by_source_id(&self, source_id: &SourceId) -> Result<Course> {
        let index_id = source_index_id(source_id.source);
        let attr = course_row::source_id_attr(source_id.source);
        let item = self
            .store
            .query_one(IndexRef::Global(&index_id), &attr, &source_id.to_value())
            .await?;
        course_row::from_item(&item)
    }

    /// Write the course's row whole. Create and update both land here.
    pub async fn save(&self, course: &Course) -> Result<()> {
        self.store.put(course_row::to_item(course)).await
    }

    /// The physical table name, for seeding rows in tests.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.store.names().table
    }
}

/// Participant rows: keyed on `(course id, participant id)`, indexed by own
/// id and by combined source value.
pub struct ParticipantRepository {
    store: EntityStore,
}

impl ParticipantRepository {
    pub fn new(client: Arc<dyn StoreClient>, config: &AccountConfig) -> Self {
        let mut index_ids = vec![ID_INDEX.to_string()];
        index_ids.extend(source_index_ids());
        let index_refs: Vec<&str> = index_ids.iter().map(String::as_str).collect();
        Self {
            store: EntityStore::new(
                client,
                &config.name_prefix,
                "participant",
                TABLE_ID,
                &index_refs,
                &[],
            ),
        }
    }

    /// Find by the participant's own id. The row key needs the parent course
    /// id as well, so this goes through the id index rather than a get.
    pub async fn find_by_id(&self, id: ParticipantId) -> Result<Participant> {
        let value = id.to_string();
        let item = self
            .store
            .query_one(IndexRef::Global(ID_INDEX), participant_row::ATTR_ID, &value)
            .await?;
        participant_row::from_item(&item)
    }

    pub async fn find_by_source_id(&self, source_id: &SourceId) -> Result<Participant> {
        let index_id = source_index_id(source_id.source);
        let attr = participant_row::source_id_attr(source_id.source);
        let item = self
            .store
            .query_one(IndexRef::Global(&index_id), &attr, &source_id.to_value())
            .await?;
        participant_row::from_item(&item)
    }

    /// Write the participant's row whole, overlays included.
    pub async fn save(&self, participant: &Participant) -> Result<()> {
        self.store.put(participant_row::to_item(participant)).await
    }
}
