use crate::error::ApiError;

/// Result of a call through [`crate::GalleryApi`]
pub type ApiResult<T> = Result<T, ApiError>;
