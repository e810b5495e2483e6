//! # Diff / Save Reconciler
//!
//! Decides whether the draft differs from the last saved snapshot and turns
//! the draft into an `updateGallery` payload.
//!
//! Comparison is structural equality on a normalized form: display-flag sets
//! become sorted lists, the active section (pure UI focus) is cleared, and
//! section and spacer ids are dropped. Those ids are minted on the client and
//! never reach the server, so only what the save payload would carry counts
//! as an edit.

use crate::layout::encode_collection;
use crate::model::{Collection, GalleryDraft, Section, StagedItem};
use gallery_common::{CreateCollectionInGalleryInput, UpdateCollectionInput, UpdateGalleryInput};
use std::collections::BTreeSet;

/// A section as the server stores it: column count and token/spacer order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSection {
    pub columns: u32,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Token(String),
    Spacer,
}

fn normalize_section(section: &Section) -> NormalizedSection {
    NormalizedSection {
        columns: section.columns,
        slots: section
            .items
            .iter()
            .map(|item| match item {
                StagedItem::Token { id } => Slot::Token(id.clone()),
                StagedItem::Whitespace { .. } => Slot::Spacer,
            })
            .collect(),
    }
}

/// Comparable view of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCollection {
    pub id: String,
    pub name: String,
    pub collectors_note: String,
    pub hidden: bool,
    pub local_only: bool,
    pub sections: Vec<NormalizedSection>,
    pub active_section_id: Option<String>,
    pub live_display_token_ids: Vec<String>,
    pub high_definition_token_ids: Vec<String>,
}

pub fn normalize(collection: &Collection) -> NormalizedCollection {
    NormalizedCollection {
        id: collection.id.clone(),
        name: collection.name.clone(),
        collectors_note: collection.collectors_note.clone(),
        hidden: collection.hidden,
        local_only: collection.local_only,
        sections: collection.sections.iter().map(normalize_section).collect(),
        active_section_id: None,
        live_display_token_ids: sorted(&collection.live_display_token_ids),
        high_definition_token_ids: sorted(&collection.high_definition_token_ids),
    }
}

fn sorted<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut ids: Vec<String> = ids.into_iter().cloned().collect();
    ids.sort();
    ids
}

/// Whole-gallery check: name, description, collection order and contents
pub fn has_unsaved_changes(current: &GalleryDraft, snapshot: &GalleryDraft) -> bool {
    if current.name != snapshot.name || current.description != snapshot.description {
        return true;
    }

    current.collections.len() != snapshot.collections.len()
        || current
            .collections
            .iter()
            .zip(&snapshot.collections)
            .any(|(a, b)| normalize(a) != normalize(b))
}

/// Per-collection check. A collection unknown to the snapshot is always unsaved.
pub fn collection_has_unsaved_changes(current: &GalleryDraft, snapshot: &GalleryDraft, collection_id: &str) -> bool {
    match (current.collection(collection_id), snapshot.collection(collection_id)) {
        (Some(now), Some(saved)) => normalize(now) != normalize(saved),
        (Some(_), None) => true,
        // Deleted since the snapshot
        (None, Some(_)) => true,
        (None, None) => false,
    }
}

/// Build the single `updateGallery` payload for the current draft
pub fn build_update_input(draft: &GalleryDraft, deleted_collection_ids: &BTreeSet<String>, edit_id: &str) -> UpdateGalleryInput {
    let mut created_collections = Vec::new();
    let mut updated_collections = Vec::new();

    for collection in &draft.collections {
        let encoded = encode_collection(collection);
        if collection.local_only {
            created_collections.push(CreateCollectionInGalleryInput {
                given_id: collection.id.clone(),
                name: collection.name.clone(),
                collectors_note: collection.collectors_note.clone(),
                tokens: encoded.tokens,
                layout: encoded.layout,
                token_settings: encoded.token_settings,
                hidden: collection.hidden,
            });
        } else {
            updated_collections.push(UpdateCollectionInput {
                dbid: collection.id.clone(),
                name: collection.name.clone(),
                collectors_note: collection.collectors_note.clone(),
                tokens: encoded.tokens,
                layout: encoded.layout,
                token_settings: encoded.token_settings,
                hidden: collection.hidden,
            });
        }
    }

    // A re-added id can't be both present and deleted
    let deleted_collections = deleted_collection_ids
        .iter()
        .filter(|id| draft.collection(id).is_none())
        .cloned()
        .collect();

    UpdateGalleryInput {
        gallery_id: draft.id.clone(),
        edit_id: edit_id.to_string(),
        name: draft.name.clone(),
        description: draft.description.clone(),
        order: draft.collections.iter().map(|c| c.id.clone()).collect(),
        created_collections,
        updated_collections,
        deleted_collections,
    }
}
