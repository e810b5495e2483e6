//! # Draft Mutations
//!
//! High-level editing operations on a [`GalleryDraft`].
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one user action
//! 2. **Validated**: `apply` validates first, so a rejected mutation leaves
//!    the draft exactly as it was
//! 3. **Serializable**: mutations can be recorded and replayed as edit scripts
//!
//! ## Semantics
//!
//! ### Sections
//! - Removing the only section of a collection leaves a fresh empty section
//! - Removing the last item of a section keeps the (now empty) section
//!
//! ### Tokens
//! - A token is staged at most once per collection; adding it again is skipped
//! - Display flags only apply to staged tokens and are cleared on removal
//!
//! ### ReplaceSections
//! - Commits a drag: must be a pure rearrangement of the collection's items

use crate::model::{Collection, GalleryDraft, Section, StagedItem, MAX_COLUMNS};
use gallery_common::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Append a new local-only collection with one empty section
    CreateCollection {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: String,
        #[serde(default)]
        collectors_note: String,
    },

    DeleteCollection {
        collection_id: String,
    },

    ToggleCollectionHidden {
        collection_id: String,
    },

    EditCollection {
        collection_id: String,
        name: String,
        collectors_note: String,
    },

    /// Move a collection to `index` in the gallery order (clamped)
    ReorderCollection {
        collection_id: String,
        index: usize,
    },

    AddSection {
        collection_id: String,
    },

    RemoveSection {
        collection_id: String,
        section_id: String,
    },

    MoveSectionUp {
        collection_id: String,
        section_id: String,
    },

    MoveSectionDown {
        collection_id: String,
        section_id: String,
    },

    SetActiveSection {
        collection_id: String,
        section_id: String,
    },

    SetSectionColumns {
        collection_id: String,
        section_id: String,
        columns: u32,
    },

    /// Stage tokens into the active section
    AddTokens {
        collection_id: String,
        token_ids: Vec<String>,
    },

    /// Stage the token if absent, unstage it if present
    ToggleTokenStaged {
        collection_id: String,
        token_id: String,
    },

    AddWhitespace {
        collection_id: String,
    },

    RemoveItem {
        collection_id: String,
        item_id: String,
    },

    ToggleTokenLiveDisplay {
        collection_id: String,
        token_id: String,
    },

    ToggleTokenHighDefinition {
        collection_id: String,
        token_id: String,
    },

    /// Commit a rearranged section list (drag-and-drop drop)
    ReplaceSections {
        collection_id: String,
        sections: Vec<Section>,
    },

    SetGalleryName {
        name: String,
    },

    SetGalleryDescription {
        description: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Token is not staged: {0}")]
    TokenNotStaged(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Column count {0} outside 1..={max}", max = MAX_COLUMNS)]
    InvalidColumns(u32),

    #[error("Section is already at the edge: {0}")]
    AtBoundary(String),

    #[error("Nothing to add: every token is already staged")]
    NothingToAdd,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl Mutation {
    /// Collection this mutation targets, if any
    pub fn collection_id(&self) -> Option<&str> {
        match self {
            Mutation::CreateCollection { id, .. } => id.as_deref(),
            Mutation::SetGalleryName { .. } | Mutation::SetGalleryDescription { .. } => None,
            Mutation::DeleteCollection { collection_id }
            | Mutation::ToggleCollectionHidden { collection_id }
            | Mutation::EditCollection { collection_id, .. }
            | Mutation::ReorderCollection { collection_id, .. }
            | Mutation::AddSection { collection_id }
            | Mutation::RemoveSection { collection_id, .. }
            | Mutation::MoveSectionUp { collection_id, .. }
            | Mutation::MoveSectionDown { collection_id, .. }
            | Mutation::SetActiveSection { collection_id, .. }
            | Mutation::SetSectionColumns { collection_id, .. }
            | Mutation::AddTokens { collection_id, .. }
            | Mutation::ToggleTokenStaged { collection_id, .. }
            | Mutation::AddWhitespace { collection_id }
            | Mutation::RemoveItem { collection_id, .. }
            | Mutation::ToggleTokenLiveDisplay { collection_id, .. }
            | Mutation::ToggleTokenHighDefinition { collection_id, .. }
            | Mutation::ReplaceSections { collection_id, .. } => Some(collection_id),
        }
    }

    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::CreateCollection { .. } => "CreateCollection",
            Mutation::DeleteCollection { .. } => "DeleteCollection",
            Mutation::ToggleCollectionHidden { .. } => "ToggleCollectionHidden",
            Mutation::EditCollection { .. } => "EditCollection",
            Mutation::ReorderCollection { .. } => "ReorderCollection",
            Mutation::AddSection { .. } => "AddSection",
            Mutation::RemoveSection { .. } => "RemoveSection",
            Mutation::MoveSectionUp { .. } => "MoveSectionUp",
            Mutation::MoveSectionDown { .. } => "MoveSectionDown",
            Mutation::SetActiveSection { .. } => "SetActiveSection",
            Mutation::SetSectionColumns { .. } => "SetSectionColumns",
            Mutation::AddTokens { .. } => "AddTokens",
            Mutation::ToggleTokenStaged { .. } => "ToggleTokenStaged",
            Mutation::AddWhitespace { .. } => "AddWhitespace",
            Mutation::RemoveItem { .. } => "RemoveItem",
            Mutation::ToggleTokenLiveDisplay { .. } => "ToggleTokenLiveDisplay",
            Mutation::ToggleTokenHighDefinition { .. } => "ToggleTokenHighDefinition",
            Mutation::ReplaceSections { .. } => "ReplaceSections",
            Mutation::SetGalleryName { .. } => "SetGalleryName",
            Mutation::SetGalleryDescription { .. } => "SetGalleryDescription",
        }
    }

    /// Apply mutation to the draft with validation
    pub fn apply(&self, draft: &mut GalleryDraft, ids: &mut IdGenerator) -> Result<(), MutationError> {
        self.validate(draft)?;

        match self {
            Mutation::CreateCollection { id, name, collectors_note } => {
                let id = id.clone().unwrap_or_else(|| ids.next_id());
                let section_id = ids.next_id();
                draft.collections.push(Collection {
                    id,
                    name: name.clone(),
                    collectors_note: collectors_note.clone(),
                    hidden: false,
                    local_only: true,
                    sections: vec![Section::empty(section_id.clone())],
                    active_section_id: Some(section_id),
                    live_display_token_ids: HashSet::new(),
                    high_definition_token_ids: HashSet::new(),
                });
                Ok(())
            }

            Mutation::DeleteCollection { collection_id } => {
                draft.collections.retain(|c| &c.id != collection_id);
                Ok(())
            }

            Mutation::ToggleCollectionHidden { collection_id } => {
                let collection = collection_mut(draft, collection_id)?;
                collection.hidden = !collection.hidden;
                Ok(())
            }

            Mutation::EditCollection { collection_id, name, collectors_note } => {
                let collection = collection_mut(draft, collection_id)?;
                collection.name = name.clone();
                collection.collectors_note = collectors_note.clone();
                Ok(())
            }

            Mutation::ReorderCollection { collection_id, index } => {
                Self::apply_reorder_collection(draft, collection_id, *index)
            }

            Mutation::AddSection { collection_id } => {
                let collection = collection_mut(draft, collection_id)?;
                let section_id = ids.next_id();
                collection.sections.push(Section::empty(section_id.clone()));
                collection.active_section_id = Some(section_id);
                Ok(())
            }

            Mutation::RemoveSection { collection_id, section_id } => {
                Self::apply_remove_section(collection_mut(draft, collection_id)?, section_id, ids)
            }

            Mutation::MoveSectionUp { collection_id, section_id } => {
                let collection = collection_mut(draft, collection_id)?;
                let index = section_index(collection, section_id)?;
                collection.sections.swap(index, index - 1);
                Ok(())
            }

            Mutation::MoveSectionDown { collection_id, section_id } => {
                let collection = collection_mut(draft, collection_id)?;
                let index = section_index(collection, section_id)?;
                collection.sections.swap(index, index + 1);
                Ok(())
            }

            Mutation::SetActiveSection { collection_id, section_id } => {
                collection_mut(draft, collection_id)?.active_section_id = Some(section_id.clone());
                Ok(())
            }

            Mutation::SetSectionColumns { collection_id, section_id, columns } => {
                let section = collection_mut(draft, collection_id)?
                    .section_mut(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                section.columns = *columns;
                Ok(())
            }

            Mutation::AddTokens { collection_id, token_ids } => {
                Self::apply_add_tokens(collection_mut(draft, collection_id)?, token_ids)
            }

            Mutation::ToggleTokenStaged { collection_id, token_id } => {
                let collection = collection_mut(draft, collection_id)?;
                if collection.contains_token(token_id) {
                    Self::apply_remove_item(collection, token_id)
                } else {
                    Self::apply_add_tokens(collection, std::slice::from_ref(token_id))
                }
            }

            Mutation::AddWhitespace { collection_id } => {
                let collection = collection_mut(draft, collection_id)?;
                let index = collection
                    .target_section_index()
                    .ok_or_else(|| MutationError::InvalidStructure("Collection has no sections".to_string()))?;
                collection.sections[index].items.push(StagedItem::whitespace(ids.next_id()));
                Ok(())
            }

            Mutation::RemoveItem { collection_id, item_id } => {
                Self::apply_remove_item(collection_mut(draft, collection_id)?, item_id)
            }

            Mutation::ToggleTokenLiveDisplay { collection_id, token_id } => {
                toggle(&mut collection_mut(draft, collection_id)?.live_display_token_ids, token_id);
                Ok(())
            }

            Mutation::ToggleTokenHighDefinition { collection_id, token_id } => {
                toggle(&mut collection_mut(draft, collection_id)?.high_definition_token_ids, token_id);
                Ok(())
            }

            Mutation::ReplaceSections { collection_id, sections } => {
                let collection = collection_mut(draft, collection_id)?;
                collection.sections = sections.clone();
                let active_still_exists = collection
                    .active_section_id
                    .as_deref()
                    .map(|id| collection.section(id).is_some())
                    .unwrap_or(false);
                if !active_still_exists {
                    collection.active_section_id = None;
                }
                Ok(())
            }

            Mutation::SetGalleryName { name } => {
                draft.name = name.clone();
                Ok(())
            }

            Mutation::SetGalleryDescription { description } => {
                draft.description = description.clone();
                Ok(())
            }
        }
    }

    fn apply_reorder_collection(draft: &mut GalleryDraft, collection_id: &str, index: usize) -> Result<(), MutationError> {
        let from = draft
            .collection_index(collection_id)
            .ok_or_else(|| MutationError::CollectionNotFound(collection_id.to_string()))?;
        let collection = draft.collections.remove(from);
        let to = index.min(draft.collections.len());
        draft.collections.insert(to, collection);
        Ok(())
    }

    fn apply_remove_section(collection: &mut Collection, section_id: &str, ids: &mut IdGenerator) -> Result<(), MutationError> {
        let index = collection
            .section_index(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;

        let removed = collection.sections.remove(index);
        for token_id in removed.token_ids() {
            collection.live_display_token_ids.remove(token_id);
            collection.high_definition_token_ids.remove(token_id);
        }

        if collection.sections.is_empty() {
            collection.sections.push(Section::empty(ids.next_id()));
        }

        if collection.active_section_id.as_deref() == Some(section_id) || collection.active_section_id.is_none() {
            let neighbour = index.saturating_sub(1).min(collection.sections.len() - 1);
            collection.active_section_id = Some(collection.sections[neighbour].id.clone());
        }

        Ok(())
    }

    fn apply_add_tokens(collection: &mut Collection, token_ids: &[String]) -> Result<(), MutationError> {
        let index = collection
            .target_section_index()
            .ok_or_else(|| MutationError::InvalidStructure("Collection has no sections".to_string()))?;

        let mut staged: HashSet<String> = collection
            .sections
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.id().to_string()))
            .collect();

        let mut added = 0;
        for token_id in token_ids {
            if staged.insert(token_id.clone()) {
                collection.sections[index].items.push(StagedItem::token(token_id.clone()));
                added += 1;
            }
        }

        if added == 0 {
            return Err(MutationError::NothingToAdd);
        }

        Ok(())
    }

    fn apply_remove_item(collection: &mut Collection, item_id: &str) -> Result<(), MutationError> {
        let section_index = collection
            .section_of_item(item_id)
            .ok_or_else(|| MutationError::ItemNotFound(item_id.to_string()))?;

        let section = &mut collection.sections[section_index];
        section.items.retain(|item| item.id() != item_id);

        collection.live_display_token_ids.remove(item_id);
        collection.high_definition_token_ids.remove(item_id);
        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, draft: &GalleryDraft) -> Result<(), MutationError> {
        match self {
            Mutation::CreateCollection { id, .. } => match id {
                Some(id) if id.is_empty() => Err(MutationError::InvalidStructure("Empty collection id".to_string())),
                Some(id) if draft.collection(id).is_some() => Err(MutationError::DuplicateId(id.clone())),
                _ => Ok(()),
            },

            Mutation::DeleteCollection { collection_id }
            | Mutation::ToggleCollectionHidden { collection_id }
            | Mutation::EditCollection { collection_id, .. }
            | Mutation::ReorderCollection { collection_id, .. }
            | Mutation::AddSection { collection_id }
            | Mutation::AddWhitespace { collection_id }
            | Mutation::ToggleTokenStaged { collection_id, .. } => {
                collection(draft, collection_id)?;
                Ok(())
            }

            Mutation::RemoveSection { collection_id, section_id }
            | Mutation::SetActiveSection { collection_id, section_id } => {
                section_index(collection(draft, collection_id)?, section_id)?;
                Ok(())
            }

            Mutation::MoveSectionUp { collection_id, section_id } => {
                let index = section_index(collection(draft, collection_id)?, section_id)?;
                if index == 0 {
                    return Err(MutationError::AtBoundary(section_id.clone()));
                }
                Ok(())
            }

            Mutation::MoveSectionDown { collection_id, section_id } => {
                let collection = collection(draft, collection_id)?;
                let index = section_index(collection, section_id)?;
                if index + 1 >= collection.sections.len() {
                    return Err(MutationError::AtBoundary(section_id.clone()));
                }
                Ok(())
            }

            Mutation::SetSectionColumns { collection_id, section_id, columns } => {
                section_index(collection(draft, collection_id)?, section_id)?;
                validate_columns(*columns)
            }

            Mutation::AddTokens { collection_id, token_ids } => {
                collection(draft, collection_id)?;
                if token_ids.iter().any(|id| id.is_empty()) {
                    return Err(MutationError::InvalidStructure("Empty token id".to_string()));
                }
                Ok(())
            }

            Mutation::RemoveItem { collection_id, item_id } => {
                collection(draft, collection_id)?
                    .section_of_item(item_id)
                    .ok_or_else(|| MutationError::ItemNotFound(item_id.clone()))?;
                Ok(())
            }

            Mutation::ToggleTokenLiveDisplay { collection_id, token_id }
            | Mutation::ToggleTokenHighDefinition { collection_id, token_id } => {
                if !collection(draft, collection_id)?.contains_token(token_id) {
                    return Err(MutationError::TokenNotStaged(token_id.clone()));
                }
                Ok(())
            }

            Mutation::ReplaceSections { collection_id, sections } => {
                validate_rearrangement(collection(draft, collection_id)?, sections)
            }

            Mutation::SetGalleryName { .. } | Mutation::SetGalleryDescription { .. } => Ok(()),
        }
    }
}

fn collection<'a>(draft: &'a GalleryDraft, collection_id: &str) -> Result<&'a Collection, MutationError> {
    draft
        .collection(collection_id)
        .ok_or_else(|| MutationError::CollectionNotFound(collection_id.to_string()))
}

fn collection_mut<'a>(draft: &'a mut GalleryDraft, collection_id: &str) -> Result<&'a mut Collection, MutationError> {
    draft
        .collection_mut(collection_id)
        .ok_or_else(|| MutationError::CollectionNotFound(collection_id.to_string()))
}

fn section_index(collection: &Collection, section_id: &str) -> Result<usize, MutationError> {
    collection
        .section_index(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn validate_columns(columns: u32) -> Result<(), MutationError> {
    if columns == 0 || columns > MAX_COLUMNS {
        return Err(MutationError::InvalidColumns(columns));
    }
    Ok(())
}

fn toggle(set: &mut HashSet<String>, id: &str) {
    if !set.remove(id) {
        set.insert(id.to_string());
    }
}

/// A proposed section list must hold exactly the collection's items, once each
fn validate_rearrangement(collection: &Collection, sections: &[Section]) -> Result<(), MutationError> {
    if sections.is_empty() {
        return Err(MutationError::InvalidStructure("A collection needs at least one section".to_string()));
    }

    let mut section_ids = HashSet::new();
    let mut proposed = BTreeSet::new();
    for section in sections {
        validate_columns(section.columns)?;
        if !section_ids.insert(section.id.as_str()) {
            return Err(MutationError::DuplicateId(section.id.clone()));
        }
        for item in &section.items {
            if !proposed.insert(item.clone()) {
                return Err(MutationError::DuplicateId(item.id().to_string()));
            }
        }
    }

    let current: BTreeSet<StagedItem> = collection
        .sections
        .iter()
        .flat_map(|s| s.items.iter().cloned())
        .collect();

    if current != proposed {
        return Err(MutationError::InvalidStructure(
            "Proposed sections are not a rearrangement of the current items".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_collection() -> GalleryDraft {
        GalleryDraft {
            id: "g1".to_string(),
            name: String::new(),
            description: String::new(),
            collections: vec![Collection {
                id: "c1".to_string(),
                name: "A".to_string(),
                collectors_note: String::new(),
                hidden: false,
                local_only: false,
                sections: vec![Section {
                    id: "s1".to_string(),
                    columns: 3,
                    items: vec![StagedItem::token("t1"), StagedItem::token("t2")],
                }],
                active_section_id: Some("s1".to_string()),
                live_display_token_ids: HashSet::new(),
                high_definition_token_ids: HashSet::new(),
            }],
        }
    }

    #[test]
    fn test_mutation_serialization() {
        let json = r#"{ "type": "setSectionColumns", "collectionId": "c1", "sectionId": "s1", "columns": 4 }"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();

        assert_eq!(
            mutation,
            Mutation::SetSectionColumns {
                collection_id: "c1".to_string(),
                section_id: "s1".to_string(),
                columns: 4,
            }
        );
    }

    #[test]
    fn test_validation_rejects_bad_columns() {
        let draft = draft_with_collection();
        for columns in [0, MAX_COLUMNS + 1] {
            let mutation = Mutation::SetSectionColumns {
                collection_id: "c1".to_string(),
                section_id: "s1".to_string(),
                columns,
            };
            assert_eq!(mutation.validate(&draft), Err(MutationError::InvalidColumns(columns)));
        }
    }

    #[test]
    fn test_rejected_mutation_leaves_draft_untouched() {
        let mut draft = draft_with_collection();
        let before = draft.clone();
        let mut ids = IdGenerator::from_seed("x".to_string());

        let mutation = Mutation::MoveSectionUp {
            collection_id: "c1".to_string(),
            section_id: "s1".to_string(),
        };

        assert!(mutation.apply(&mut draft, &mut ids).is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_replace_sections_must_be_rearrangement() {
        let draft = draft_with_collection();

        let losing_item = Mutation::ReplaceSections {
            collection_id: "c1".to_string(),
            sections: vec![Section {
                id: "s1".to_string(),
                columns: 3,
                items: vec![StagedItem::token("t1")],
            }],
        };
        assert!(matches!(losing_item.validate(&draft), Err(MutationError::InvalidStructure(_))));

        let duplicating_item = Mutation::ReplaceSections {
            collection_id: "c1".to_string(),
            sections: vec![Section {
                id: "s1".to_string(),
                columns: 3,
                items: vec![StagedItem::token("t1"), StagedItem::token("t1"), StagedItem::token("t2")],
            }],
        };
        assert_eq!(
            duplicating_item.validate(&draft),
            Err(MutationError::DuplicateId("t1".to_string()))
        );
    }

    #[test]
    fn test_toggle_token_staged_round_trip() {
        let mut draft = draft_with_collection();
        let mut ids = IdGenerator::from_seed("x".to_string());

        let toggle = Mutation::ToggleTokenStaged {
            collection_id: "c1".to_string(),
            token_id: "t3".to_string(),
        };

        toggle.apply(&mut draft, &mut ids).unwrap();
        assert!(draft.collections[0].contains_token("t3"));

        toggle.apply(&mut draft, &mut ids).unwrap();
        assert!(!draft.collections[0].contains_token("t3"));
    }

    fn two_sections() -> GalleryDraft {
        let mut draft = draft_with_collection();
        let collection = &mut draft.collections[0];
        collection.sections.push(Section {
            id: "s2".to_string(),
            columns: 2,
            items: vec![StagedItem::token("t3")],
        });
        collection.active_section_id = Some("s2".to_string());
        draft
    }

    fn section_ids(draft: &GalleryDraft) -> Vec<&str> {
        draft.collections[0].sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_move_section_down_then_up() {
        let mut draft = two_sections();
        let mut ids = IdGenerator::from_seed("x".to_string());

        Mutation::MoveSectionDown {
            collection_id: "c1".to_string(),
            section_id: "s1".to_string(),
        }
        .apply(&mut draft, &mut ids)
        .unwrap();
        assert_eq!(section_ids(&draft), vec!["s2", "s1"]);

        Mutation::MoveSectionUp {
            collection_id: "c1".to_string(),
            section_id: "s1".to_string(),
        }
        .apply(&mut draft, &mut ids)
        .unwrap();
        assert_eq!(section_ids(&draft), vec!["s1", "s2"]);
    }

    #[test]
    fn test_reorder_collection_clamps_index() {
        let mut draft = draft_with_collection();
        for id in ["c2", "c3"] {
            let mut other = draft.collections[0].clone();
            other.id = id.to_string();
            draft.collections.push(other);
        }
        let mut ids = IdGenerator::from_seed("x".to_string());
        let order = |d: &GalleryDraft| d.collections.iter().map(|c| c.id.clone()).collect::<Vec<_>>();

        Mutation::ReorderCollection {
            collection_id: "c1".to_string(),
            index: 99,
        }
        .apply(&mut draft, &mut ids)
        .unwrap();
        assert_eq!(order(&draft), vec!["c2", "c3", "c1"]);

        Mutation::ReorderCollection {
            collection_id: "c1".to_string(),
            index: 0,
        }
        .apply(&mut draft, &mut ids)
        .unwrap();
        assert_eq!(order(&draft), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_removing_only_section_leaves_fresh_active_section() {
        let mut draft = draft_with_collection();
        draft.collections[0].live_display_token_ids.insert("t1".to_string());
        let mut ids = IdGenerator::from_seed("x".to_string());

        Mutation::RemoveSection {
            collection_id: "c1".to_string(),
            section_id: "s1".to_string(),
        }
        .apply(&mut draft, &mut ids)
        .unwrap();

        let collection = &draft.collections[0];
        assert_eq!(collection.sections, vec![Section::empty("x-1")]);
        assert_eq!(collection.active_section_id.as_deref(), Some("x-1"));
        assert!(collection.live_display_token_ids.is_empty());
    }

    #[test]
    fn test_removing_active_section_focuses_neighbour() {
        let mut draft = two_sections();
        let mut ids = IdGenerator::from_seed("x".to_string());

        Mutation::RemoveSection {
            collection_id: "c1".to_string(),
            section_id: "s2".to_string(),
        }
        .apply(&mut draft, &mut ids)
        .unwrap();

        assert_eq!(section_ids(&draft), vec!["s1"]);
        assert_eq!(draft.collections[0].active_section_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_section_edit_sequence() {
        let mut draft = draft_with_collection();
        let mut ids = IdGenerator::from_seed("x".to_string());
        let steps = [
            Mutation::AddSection {
                collection_id: "c1".to_string(),
            },
            Mutation::MoveSectionDown {
                collection_id: "c1".to_string(),
                section_id: "s1".to_string(),
            },
            Mutation::RemoveSection {
                collection_id: "c1".to_string(),
                section_id: "s1".to_string(),
            },
            Mutation::RemoveSection {
                collection_id: "c1".to_string(),
                section_id: "x-1".to_string(),
            },
        ];

        for step in &steps {
            step.apply(&mut draft, &mut ids).unwrap();
        }

        let collection = &draft.collections[0];
        assert_eq!(collection.sections, vec![Section::empty("x-2")]);
        assert_eq!(collection.active_section_id.as_deref(), Some("x-2"));
    }

    #[test]
    fn test_add_tokens_lands_in_active_section() {
        let mut draft = two_sections();
        let mut ids = IdGenerator::from_seed("x".to_string());

        Mutation::SetActiveSection {
            collection_id: "c1".to_string(),
            section_id: "s1".to_string(),
        }
        .apply(&mut draft, &mut ids)
        .unwrap();
        assert_eq!(draft.collections[0].active_section_id.as_deref(), Some("s1"));

        let add = |token_ids: &[&str]| Mutation::AddTokens {
            collection_id: "c1".to_string(),
            token_ids: token_ids.iter().map(|t| t.to_string()).collect(),
        };

        // t1 is already staged and is skipped
        add(&["t4", "t1"]).apply(&mut draft, &mut ids).unwrap();

        let s1: Vec<&str> = draft.collections[0].sections[0].items.iter().map(|i| i.id()).collect();
        assert_eq!(s1, vec!["t1", "t2", "t4"]);
        assert_eq!(draft.collections[0].sections[1].items, vec![StagedItem::token("t3")]);

        assert_eq!(add(&["t1", "t3"]).apply(&mut draft, &mut ids), Err(MutationError::NothingToAdd));
    }

    #[test]
    fn test_toggle_high_definition() {
        let mut draft = draft_with_collection();
        let mut ids = IdGenerator::from_seed("x".to_string());
        let toggle = |token_id: &str| Mutation::ToggleTokenHighDefinition {
            collection_id: "c1".to_string(),
            token_id: token_id.to_string(),
        };

        toggle("t1").apply(&mut draft, &mut ids).unwrap();
        assert!(draft.collections[0].high_definition_token_ids.contains("t1"));

        toggle("t1").apply(&mut draft, &mut ids).unwrap();
        assert!(draft.collections[0].high_definition_token_ids.is_empty());

        assert_eq!(
            toggle("t9").apply(&mut draft, &mut ids),
            Err(MutationError::TokenNotStaged("t9".to_string()))
        );
    }
}
