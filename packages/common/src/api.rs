use crate::result::ApiResult;
use crate::wire::{
    GalleryRecord, MoveCollectionToGalleryInput, PublishGalleryInput, UpdateGalleryInput,
};
use async_trait::async_trait;

/// Request/response boundary to the gallery backend
///
/// Each call is one atomic external operation: it resolves to the success
/// payload or to an [`crate::ApiError`], never to a partial result.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// Fetch a gallery with its collections, sections and tokens
    async fn fetch_gallery(&self, gallery_id: &str) -> ApiResult<GalleryRecord>;

    /// Save collections, ordering, name and description in one mutation.
    /// Returns the server's canonical gallery.
    async fn update_gallery(&self, input: UpdateGalleryInput) -> ApiResult<GalleryRecord>;

    /// Mark the gallery visible and notify followers
    async fn publish_gallery(&self, input: PublishGalleryInput) -> ApiResult<()>;

    /// Move an already persisted collection into another gallery
    async fn move_collection(&self, input: MoveCollectionToGalleryInput) -> ApiResult<()>;
}
