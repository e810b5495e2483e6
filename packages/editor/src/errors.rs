//! Error types for the editor

use gallery_common::ApiError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Gallery has no id")]
    MissingGalleryId,

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Saved gallery has no collection at position {position} for {collection_id}")]
    UnresolvedCollection { collection_id: String, position: usize },
}
