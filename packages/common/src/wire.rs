//! # Wire Types
//!
//! Shapes exchanged with the gallery GraphQL API. Field names follow the
//! remote schema (camelCase, with a few legacy spellings such as `givenID`).
//!
//! A collection travels as a flat token list plus a [`LayoutRecord`]:
//!
//! ```text
//! tokens:        [t1, t2, t3, t4, t5]
//! sections:      [0, 3]                 start index of each section
//! sectionLayout: [{columns: 3, whitespace: [1]},
//!                 {columns: 2, whitespace: []}]
//!
//! section 0 → t1 _ t2 t3     (one spacer after the first token)
//! section 1 → t4 t5
//! ```

use serde::{Deserialize, Serialize};

/// Reference to an owned token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRef {
    pub dbid: String,
}

impl TokenRef {
    pub fn new(dbid: impl Into<String>) -> Self {
        Self { dbid: dbid.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayoutRecord {
    pub columns: u32,

    /// For each spacer, how many of the section's tokens come before it
    #[serde(default)]
    pub whitespace: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    /// Start index of each section within the flat token list
    #[serde(default)]
    pub sections: Vec<u32>,

    #[serde(default)]
    pub section_layout: Vec<SectionLayoutRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSettingsRecord {
    pub token_id: String,
    #[serde(default)]
    pub render_live: bool,
    #[serde(default)]
    pub high_definition: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub dbid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub collectors_note: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub tokens: Vec<TokenRef>,
    #[serde(default)]
    pub layout: Option<LayoutRecord>,
    #[serde(default)]
    pub token_settings: Vec<TokenSettingsRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryRecord {
    pub dbid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub collections: Vec<CollectionRecord>,
}

/// Collection originated in this editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionInGalleryInput {
    #[serde(rename = "givenID")]
    pub given_id: String,
    pub name: String,
    pub collectors_note: String,
    pub tokens: Vec<String>,
    pub layout: LayoutRecord,
    pub token_settings: Vec<TokenSettingsRecord>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionInput {
    pub dbid: String,
    pub name: String,
    pub collectors_note: String,
    pub tokens: Vec<String>,
    pub layout: LayoutRecord,
    pub token_settings: Vec<TokenSettingsRecord>,
    pub hidden: bool,
}

/// Full gallery save, applied by the server as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryInput {
    pub gallery_id: String,
    pub edit_id: String,
    pub name: String,
    pub description: String,
    /// Every collection id (client ids for created ones) in display order
    pub order: Vec<String>,
    pub created_collections: Vec<CreateCollectionInGalleryInput>,
    pub updated_collections: Vec<UpdateCollectionInput>,
    pub deleted_collections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishGalleryInput {
    pub gallery_id: String,
    pub edit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCollectionToGalleryInput {
    pub source_collection_id: String,
    pub target_gallery_id: String,
}
