//! # Editor Model
//!
//! In-memory shape of a gallery while it is being edited.
//!
//! ```text
//! GalleryDraft
//!   └─ Collection*          (ordered)
//!        └─ Section*        (ordered, columns 1..=6)
//!             └─ StagedItem* (token | whitespace, ordered)
//! ```
//!
//! Item ids double as drag-and-drop identities and appear at most once per
//! collection. A token item's id is the token id itself; spacer, section and
//! client collection ids come from the session's id generator and are unique
//! across the whole draft.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Widest grid a section may use
pub const MAX_COLUMNS: u32 = 6;

/// Column count for new sections and for collections saved without a layout
pub const DEFAULT_COLUMNS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StagedItem {
    /// An owned asset; `id` is the token id
    Token { id: String },
    /// Layout-only spacer
    Whitespace { id: String },
}

impl StagedItem {
    pub fn token(id: impl Into<String>) -> Self {
        StagedItem::Token { id: id.into() }
    }

    pub fn whitespace(id: impl Into<String>) -> Self {
        StagedItem::Whitespace { id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            StagedItem::Token { id } | StagedItem::Whitespace { id } => id,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, StagedItem::Token { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub columns: u32,
    #[serde(default)]
    pub items: Vec<StagedItem>,
}

impl Section {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: DEFAULT_COLUMNS,
            items: Vec::new(),
        }
    }

    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == item_id)
    }

    pub fn token_ids(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.is_token())
            .map(|item| item.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub collectors_note: String,
    pub hidden: bool,

    /// Created in this session and not yet known to the server
    pub local_only: bool,

    pub sections: Vec<Section>,

    /// Section that receives newly added tokens (UI focus, not persisted)
    pub active_section_id: Option<String>,

    pub live_display_token_ids: HashSet<String>,
    pub high_definition_token_ids: HashSet<String>,
}

impl Collection {
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Section new tokens go to: the active one, else the last one
    pub fn target_section_index(&self) -> Option<usize> {
        self.active_section_id
            .as_deref()
            .and_then(|id| self.section_index(id))
            .or_else(|| self.sections.len().checked_sub(1))
    }

    /// Section currently holding `item_id`
    pub fn section_of_item(&self, item_id: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.position_of(item_id).is_some())
    }

    pub fn contains_token(&self, token_id: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.token_ids().any(|id| id == token_id))
    }

    /// Tokens in display order, flattened across sections
    pub fn token_ids(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|s| s.token_ids().map(str::to_string))
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub collections: Vec<Collection>,
}

impl GalleryDraft {
    pub fn collection(&self, collection_id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == collection_id)
    }

    pub fn collection_mut(&mut self, collection_id: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.id == collection_id)
    }

    pub fn collection_index(&self, collection_id: &str) -> Option<usize> {
        self.collections.iter().position(|c| c.id == collection_id)
    }

    /// Ids of every collection, section and item in the draft
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().flat_map(|c| {
            std::iter::once(c.id.as_str()).chain(c.sections.iter().flat_map(|s| {
                std::iter::once(s.id.as_str()).chain(s.items.iter().map(|i| i.id()))
            }))
        })
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.all_ids().any(|existing| existing == id)
    }

    pub fn hidden_collection_ids(&self) -> HashSet<String> {
        self.collections
            .iter()
            .filter(|c| c.hidden)
            .map(|c| c.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Collection {
        Collection {
            id: "c1".to_string(),
            name: "Collection".to_string(),
            collectors_note: String::new(),
            hidden: false,
            local_only: false,
            sections: vec![
                Section {
                    id: "s1".to_string(),
                    columns: 3,
                    items: vec![StagedItem::token("t1"), StagedItem::whitespace("w1")],
                },
                Section {
                    id: "s2".to_string(),
                    columns: 2,
                    items: vec![StagedItem::token("t2")],
                },
            ],
            active_section_id: None,
            live_display_token_ids: HashSet::new(),
            high_definition_token_ids: HashSet::new(),
        }
    }

    #[test]
    fn test_target_section_falls_back_to_last() {
        let mut collection = sample();
        assert_eq!(collection.target_section_index(), Some(1));

        collection.active_section_id = Some("s1".to_string());
        assert_eq!(collection.target_section_index(), Some(0));

        collection.active_section_id = Some("gone".to_string());
        assert_eq!(collection.target_section_index(), Some(1));
    }

    #[test]
    fn test_token_ids_skip_whitespace() {
        let collection = sample();
        assert_eq!(collection.token_ids(), vec!["t1", "t2"]);
        assert_eq!(collection.item_count(), 3);
        assert_eq!(collection.section_of_item("w1"), Some(0));
    }

    #[test]
    fn test_staged_item_serializes_with_kind_tag() {
        let json = serde_json::to_value(StagedItem::whitespace("w1")).unwrap();
        assert_eq!(json["kind"], "whitespace");
        assert_eq!(json["id"], "w1");
    }

    #[test]
    fn test_draft_ids_cover_every_level() {
        let draft = GalleryDraft {
            id: "g1".to_string(),
            name: String::new(),
            description: String::new(),
            collections: vec![sample()],
        };

        let ids: Vec<&str> = draft.all_ids().collect();
        assert_eq!(ids, vec!["c1", "s1", "t1", "w1", "s2", "t2"]);
        assert!(draft.contains_id("w1"));
        assert!(!draft.contains_id("t9"));
    }
}
