//! # Gallery Editor
//!
//! Core editing engine for galleries of collections.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ GalleryApi: fetch gallery → GalleryRecord   │
//! └─────────────────────────────────────────────┘
//!                     ↓ decode (layout codec)
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - CollectionStore: validated mutations     │
//! │  - DragSession: preview, then commit        │
//! │  - Reconciler: diff vs snapshot, payloads   │
//! └─────────────────────────────────────────────┘
//!                     ↓ updateGallery / publish / move
//! ┌─────────────────────────────────────────────┐
//! │ GalleryApi: server echo replaces local state│
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single owner**: the session owns all editor state; consumers read it
//!    and send mutations
//! 2. **Graceful degradation**: a stale id turns a mutation into a no-op
//! 3. **Value diffing**: "unsaved changes" is equality against a snapshot
//! 4. **Server authority**: a successful save replaces local state wholesale
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gallery_editor::{EditSession, Mutation, DragNode, OverTarget};
//!
//! let mut session = EditSession::load(&api, "gallery-1").await?;
//!
//! session.apply(Mutation::AddSection { collection_id: "c1".into() });
//!
//! let drag = session.begin_drag("c1", DragNode::Item("token-2".into())).unwrap();
//! session.finish_drag("c1", drag, &[OverTarget::Section("s2".into())]);
//!
//! if session.has_unsaved_changes() {
//!     session.save(&api).await?;
//! }
//! ```

mod drag;
mod errors;
mod feedback;
mod layout;
mod model;
mod mutations;
mod reconciler;
mod session;
mod store;

pub use drag::{arrange, resolve_target, DragNode, DragSession, DropOutcome, OverTarget};
pub use errors::EditorError;
pub use feedback::{
    ErrorReporter, ErrorTags, LogNotifier, Notifier, RecordingNotifier, RecordingReporter, Toast,
    TracingReporter,
};
pub use layout::{decode_collection, decode_gallery, encode_collection, EncodedCollection};
pub use model::{Collection, GalleryDraft, Section, StagedItem, DEFAULT_COLUMNS, MAX_COLUMNS};
pub use mutations::{Mutation, MutationError};
pub use reconciler::{
    build_update_input, collection_has_unsaved_changes, has_unsaved_changes, normalize,
    NormalizedCollection, NormalizedSection, Slot,
};
pub use session::{EditSession, MoveOutcome};
pub use store::{CollectionStore, MutationOutcome};

// Re-export the wire contract for convenience
pub use gallery_common::{ApiError, GalleryApi, GalleryRecord};
