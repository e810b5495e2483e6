//! # Collection State Store
//!
//! Single owner of the draft being edited. Every edit goes through
//! [`CollectionStore::apply`], which never fails: a mutation that references a
//! stale or unknown id degrades to [`MutationOutcome::Noop`] and is logged, so
//! one bad reference cannot take the editor down.

use crate::model::GalleryDraft;
use crate::mutations::Mutation;
use gallery_common::IdGenerator;
use std::collections::BTreeSet;

/// What happened to a mutation handed to the store
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Mutation was applied; the store is now at `version`
    Applied { version: u64 },
    /// Mutation had no effect (unknown id, invalid value, nothing to do)
    Noop { reason: String },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CollectionStore {
    draft: GalleryDraft,

    /// Increments on each applied mutation
    version: u64,

    ids: IdGenerator,

    /// Server-known collections deleted since the last save
    deleted_collection_ids: BTreeSet<String>,
}

impl CollectionStore {
    pub fn new(draft: GalleryDraft, ids: IdGenerator) -> Self {
        Self {
            draft,
            version: 0,
            ids,
            deleted_collection_ids: BTreeSet::new(),
        }
    }

    pub fn draft(&self) -> &GalleryDraft {
        &self.draft
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn deleted_collection_ids(&self) -> &BTreeSet<String> {
        &self.deleted_collection_ids
    }

    /// Apply a mutation, degrading to a no-op when it does not fit the draft
    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        let deleted_server_id = match &mutation {
            Mutation::DeleteCollection { collection_id } => self
                .draft
                .collection(collection_id)
                .filter(|c| !c.local_only)
                .map(|c| c.id.clone()),
            _ => None,
        };

        match mutation.apply(&mut self.draft, &mut self.ids) {
            Ok(()) => {
                if let Some(id) = deleted_server_id {
                    self.deleted_collection_ids.insert(id);
                }
                self.version += 1;
                tracing::debug!(
                    mutation = mutation.name(),
                    version = self.version,
                    "applied mutation"
                );
                MutationOutcome::Applied {
                    version: self.version,
                }
            }
            Err(e) => {
                tracing::warn!(
                    mutation = mutation.name(),
                    collection_id = mutation.collection_id().unwrap_or_default(),
                    error = %e,
                    "ignored mutation"
                );
                MutationOutcome::Noop {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = Mutation>) -> Vec<MutationOutcome> {
        mutations.into_iter().map(|m| self.apply(m)).collect()
    }

    /// Create a local-only collection and return its client id
    pub fn create_collection(&mut self, name: impl Into<String>, collectors_note: impl Into<String>) -> String {
        let id = self.ids.next_id();
        self.apply(Mutation::CreateCollection {
            id: Some(id.clone()),
            name: name.into(),
            collectors_note: collectors_note.into(),
        });
        id
    }

    /// Swap in the server's canonical draft after a successful save
    pub fn replace(&mut self, draft: GalleryDraft) {
        self.draft = draft;
        self.deleted_collection_ids.clear();
        self.version += 1;
    }

    /// Drop a collection that now lives in another gallery.
    ///
    /// Unlike a delete, this is not recorded for the next save.
    pub fn forget_collection(&mut self, collection_id: &str) -> bool {
        let before = self.draft.collections.len();
        self.draft.collections.retain(|c| c.id != collection_id);
        let removed = self.draft.collections.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    pub(crate) fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> CollectionStore {
        CollectionStore::new(
            GalleryDraft {
                id: "g1".to_string(),
                name: String::new(),
                description: String::new(),
                collections: vec![],
            },
            IdGenerator::from_seed("test".to_string()),
        )
    }

    #[test]
    fn test_missing_collection_is_noop() {
        let mut store = empty_store();

        let outcome = store.apply(Mutation::ToggleCollectionHidden {
            collection_id: "nope".to_string(),
        });

        assert!(matches!(outcome, MutationOutcome::Noop { .. }));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_create_collection_is_local_with_active_section() {
        let mut store = empty_store();
        let id = store.create_collection("New", "");

        let collection = store.draft().collection(&id).unwrap();
        assert!(collection.local_only);
        assert_eq!(collection.sections.len(), 1);
        assert_eq!(
            collection.active_section_id.as_deref(),
            Some(collection.sections[0].id.as_str())
        );
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_deleting_local_collection_is_not_tracked() {
        let mut store = empty_store();
        let id = store.create_collection("Temp", "");

        let outcome = store.apply(Mutation::DeleteCollection { collection_id: id });

        assert!(outcome.is_applied());
        assert!(store.deleted_collection_ids().is_empty());
        assert!(store.draft().collections.is_empty());
    }

    #[test]
    fn test_forget_collection_skips_deleted_ids() {
        let mut store = empty_store();
        store.apply(Mutation::CreateCollection {
            id: Some("c1".to_string()),
            name: String::new(),
            collectors_note: String::new(),
        });

        assert!(store.forget_collection("c1"));
        assert!(!store.forget_collection("c1"));
        assert!(store.deleted_collection_ids().is_empty());
    }
}
