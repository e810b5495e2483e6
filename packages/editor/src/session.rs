//! # Edit Session
//!
//! One user's editing session over one gallery: the collection store, the
//! snapshot of what the server last confirmed, and the save/publish/move
//! flows that reconcile the two.
//!
//! Local edits are speculative until a save succeeds; the server's echo then
//! replaces both the store and the snapshot, so the next diff starts from
//! zero. A failed call leaves local state untouched and is reported once.
//!
//! Every flow takes `&mut self`, so a session can't run two saves at once.

use crate::drag::{DragNode, DragSession, OverTarget};
use crate::errors::EditorError;
use crate::feedback::{ErrorReporter, ErrorTags, LogNotifier, Notifier, Toast, TracingReporter};
use crate::layout::decode_gallery;
use crate::model::{Collection, GalleryDraft};
use crate::mutations::Mutation;
use crate::reconciler::{build_update_input, collection_has_unsaved_changes, has_unsaved_changes};
use crate::store::{CollectionStore, MutationOutcome};
use chrono::{DateTime, Utc};
use gallery_common::{
    GalleryApi, GalleryRecord, IdGenerator, MoveCollectionToGalleryInput, PublishGalleryInput,
    UpdateGalleryInput,
};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Result of a successful move-to-gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Server id of the collection that was moved
    pub collection_id: String,
    /// Whether unsaved changes had to be saved before moving
    pub saved_first: bool,
}

pub struct EditSession {
    /// Edit-session token; keys `updateGallery` and `publishGallery`
    pub id: String,

    store: CollectionStore,

    /// Last state confirmed by the server
    snapshot: GalleryDraft,

    last_saved_at: Option<DateTime<Utc>>,

    reporter: Arc<dyn ErrorReporter>,
    notifier: Arc<dyn Notifier>,
}

impl EditSession {
    /// Seed a session from a fetched gallery with a fresh edit id
    pub fn new(record: &GalleryRecord) -> Self {
        Self::with_edit_id(uuid::Uuid::new_v4().to_string(), record)
    }

    /// Section and spacer ids are derived from the gallery id alone, so two
    /// sessions over the same record agree on them; `edit_id` only keys the
    /// server mutations.
    pub fn with_edit_id(edit_id: String, record: &GalleryRecord) -> Self {
        let mut ids = IdGenerator::for_gallery(&record.dbid);
        let draft = decode_gallery(record, &mut ids);

        Self {
            id: edit_id,
            snapshot: draft.clone(),
            store: CollectionStore::new(draft, ids),
            last_saved_at: None,
            reporter: Arc::new(TracingReporter),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_feedback(mut self, reporter: Arc<dyn ErrorReporter>, notifier: Arc<dyn Notifier>) -> Self {
        self.reporter = reporter;
        self.notifier = notifier;
        self
    }

    /// Fetch a gallery and open a session on it
    pub async fn load(api: &dyn GalleryApi, gallery_id: &str) -> Result<Self, EditorError> {
        let record = api.fetch_gallery(gallery_id).await?;
        tracing::info!(gallery_id, collections = record.collections.len(), "loaded gallery");
        Ok(Self::new(&record))
    }

    pub fn draft(&self) -> &GalleryDraft {
        self.store.draft()
    }

    pub fn collections(&self) -> &[Collection] {
        &self.store.draft().collections
    }

    pub fn snapshot(&self) -> &GalleryDraft {
        &self.snapshot
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn hidden_collection_ids(&self) -> HashSet<String> {
        self.store.draft().hidden_collection_ids()
    }

    pub fn deleted_collection_ids(&self) -> &BTreeSet<String> {
        self.store.deleted_collection_ids()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn has_unsaved_changes(&self) -> bool {
        has_unsaved_changes(self.store.draft(), &self.snapshot)
    }

    pub fn collection_has_unsaved_changes(&self, collection_id: &str) -> bool {
        collection_has_unsaved_changes(self.store.draft(), &self.snapshot, collection_id)
    }

    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        self.store.apply(mutation)
    }

    pub fn create_collection(&mut self, name: impl Into<String>, collectors_note: impl Into<String>) -> String {
        self.store.create_collection(name, collectors_note)
    }

    /// Start dragging a section or item of one collection
    pub fn begin_drag(&self, collection_id: &str, node: DragNode) -> Option<DragSession> {
        let collection = self.store.draft().collection(collection_id)?;
        DragSession::begin(&collection.sections, node)
    }

    /// Finish a drag; `None` when the drop changed nothing
    pub fn finish_drag(&mut self, collection_id: &str, drag: DragSession, collisions: &[OverTarget]) -> Option<MutationOutcome> {
        let mutation = drag.end(collisions).into_mutation(collection_id)?;
        Some(self.store.apply(mutation))
    }

    /// Payload the next save would send
    pub fn update_input(&self) -> UpdateGalleryInput {
        build_update_input(self.store.draft(), self.store.deleted_collection_ids(), &self.id)
    }

    /// Save the whole gallery in one mutation.
    ///
    /// On failure the error has already been reported and toasted; callers
    /// only need it to decide what to do next.
    pub async fn save(&mut self, api: &dyn GalleryApi) -> Result<(), EditorError> {
        let gallery_id = self.store.draft().id.clone();
        if gallery_id.is_empty() {
            let err = EditorError::MissingGalleryId;
            self.reporter.report(&err, &ErrorTags::default());
            return Err(err);
        }

        let input = self.update_input();
        tracing::info!(
            gallery_id = %gallery_id,
            created = input.created_collections.len(),
            updated = input.updated_collections.len(),
            deleted = input.deleted_collections.len(),
            "saving gallery"
        );

        match api.update_gallery(input).await {
            Ok(record) => {
                self.replace_with(&record);
                self.last_saved_at = Some(Utc::now());
                Ok(())
            }
            Err(e) => {
                let err = EditorError::Api(e);
                self.surface(&err, ErrorTags::gallery(&gallery_id), "Failed to save your gallery");
                Err(err)
            }
        }
    }

    /// Publish the gallery, saving pending changes first
    pub async fn publish(&mut self, api: &dyn GalleryApi, caption: Option<String>) -> Result<(), EditorError> {
        if self.has_unsaved_changes() {
            self.save(api).await?;
        }

        let gallery_id = self.store.draft().id.clone();
        let input = PublishGalleryInput {
            gallery_id: gallery_id.clone(),
            edit_id: self.id.clone(),
            caption,
        };

        match api.publish_gallery(input).await {
            Ok(()) => {
                tracing::info!(gallery_id = %gallery_id, "published gallery");
                Ok(())
            }
            Err(e) => {
                let err = EditorError::Api(e);
                self.surface(&err, ErrorTags::gallery(&gallery_id), "Failed to publish your gallery");
                Err(err)
            }
        }
    }

    /// Move a collection into another gallery.
    ///
    /// The move only works on persisted collections, so unsaved changes are
    /// saved first. A collection created in this session is found again after
    /// the save by its position in the gallery order.
    pub async fn move_collection_to_gallery(
        &mut self,
        api: &dyn GalleryApi,
        collection_id: &str,
        target_gallery_id: &str,
    ) -> Result<MoveOutcome, EditorError> {
        let gallery_id = self.store.draft().id.clone();
        let tags = ErrorTags::gallery(&gallery_id).with_collection(collection_id);

        let Some(position) = self.store.draft().collection_index(collection_id) else {
            let err = EditorError::CollectionNotFound(collection_id.to_string());
            self.reporter.report(&err, &tags);
            return Err(err);
        };

        let saved_first = self.has_unsaved_changes();
        if saved_first {
            self.save(api).await?;
        }

        let source_collection_id = if self.store.draft().collection(collection_id).is_some() {
            collection_id.to_string()
        } else {
            match self.store.draft().collections.get(position) {
                Some(saved) => saved.id.clone(),
                None => {
                    let err = EditorError::UnresolvedCollection {
                        collection_id: collection_id.to_string(),
                        position,
                    };
                    self.reporter.report(&err, &tags);
                    return Err(err);
                }
            }
        };

        let input = MoveCollectionToGalleryInput {
            source_collection_id: source_collection_id.clone(),
            target_gallery_id: target_gallery_id.to_string(),
        };

        match api.move_collection(input).await {
            Ok(()) => {
                self.store.forget_collection(&source_collection_id);
                self.snapshot.collections.retain(|c| c.id != source_collection_id);
                tracing::info!(
                    collection_id = %source_collection_id,
                    target_gallery_id,
                    "moved collection"
                );
                Ok(MoveOutcome {
                    collection_id: source_collection_id,
                    saved_first,
                })
            }
            Err(e) => {
                let err = EditorError::Api(e);
                let tags = ErrorTags::gallery(&gallery_id).with_collection(&source_collection_id);
                self.surface(&err, tags, "Failed to move your collection");
                Err(err)
            }
        }
    }

    /// Replace local state and snapshot with the server's canonical gallery
    fn replace_with(&mut self, record: &GalleryRecord) {
        let draft = decode_gallery(record, self.store.ids_mut());
        self.snapshot = draft.clone();
        self.store.replace(draft);
    }

    fn surface(&self, err: &EditorError, tags: ErrorTags, message: &str) {
        self.reporter.report(err, &tags);
        self.notifier.push_toast(Toast::error(format!("{}: {}", message, err)));
    }
}
