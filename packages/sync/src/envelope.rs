//! Request/response envelopes and `__typename`-discriminated result payloads.
//!
//! Each operation's result is a union of one success type and a few error
//! types. Unknown typenames decode to `Other` instead of failing, so a schema
//! that grows new error types still yields a typed [`ApiError`].

use gallery_common::{ApiError, ApiResult, GalleryRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a, V> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Body of any `Err*` result type
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: String,
}

fn rejected(typename: &str, error: ErrorMessage) -> ApiError {
    ApiError::Rejected {
        typename: typename.to_string(),
        message: error.message,
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum GalleryByIdResult {
    Gallery(GalleryRecord),
    ErrGalleryNotFound(ErrorMessage),
    ErrInvalidInput(ErrorMessage),
    #[serde(other)]
    Other,
}

impl GalleryByIdResult {
    pub fn into_result(self) -> ApiResult<GalleryRecord> {
        match self {
            Self::Gallery(gallery) => Ok(gallery),
            Self::ErrGalleryNotFound(e) => Err(rejected("ErrGalleryNotFound", e)),
            Self::ErrInvalidInput(e) => Err(rejected("ErrInvalidInput", e)),
            Self::Other => Err(ApiError::unexpected("galleryById")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum UpdateGalleryResult {
    UpdateGalleryPayload { gallery: GalleryRecord },
    ErrInvalidInput(ErrorMessage),
    ErrNotAuthorized(ErrorMessage),
    ErrGalleryNotFound(ErrorMessage),
    #[serde(other)]
    Other,
}

impl UpdateGalleryResult {
    pub fn into_result(self) -> ApiResult<GalleryRecord> {
        match self {
            Self::UpdateGalleryPayload { gallery } => Ok(gallery),
            Self::ErrInvalidInput(e) => Err(rejected("ErrInvalidInput", e)),
            Self::ErrNotAuthorized(e) => Err(rejected("ErrNotAuthorized", e)),
            Self::ErrGalleryNotFound(e) => Err(rejected("ErrGalleryNotFound", e)),
            Self::Other => Err(ApiError::unexpected("updateGallery")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum PublishGalleryResult {
    PublishGalleryPayload {},
    ErrInvalidInput(ErrorMessage),
    ErrNotAuthorized(ErrorMessage),
    #[serde(other)]
    Other,
}

impl PublishGalleryResult {
    pub fn into_result(self) -> ApiResult<()> {
        match self {
            Self::PublishGalleryPayload {} => Ok(()),
            Self::ErrInvalidInput(e) => Err(rejected("ErrInvalidInput", e)),
            Self::ErrNotAuthorized(e) => Err(rejected("ErrNotAuthorized", e)),
            Self::Other => Err(ApiError::unexpected("publishGallery")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum MoveCollectionResult {
    MoveCollectionToGalleryPayload {},
    ErrInvalidInput(ErrorMessage),
    ErrNotAuthorized(ErrorMessage),
    ErrCollectionNotFound(ErrorMessage),
    ErrGalleryNotFound(ErrorMessage),
    #[serde(other)]
    Other,
}

impl MoveCollectionResult {
    pub fn into_result(self) -> ApiResult<()> {
        match self {
            Self::MoveCollectionToGalleryPayload {} => Ok(()),
            Self::ErrInvalidInput(e) => Err(rejected("ErrInvalidInput", e)),
            Self::ErrNotAuthorized(e) => Err(rejected("ErrNotAuthorized", e)),
            Self::ErrCollectionNotFound(e) => Err(rejected("ErrCollectionNotFound", e)),
            Self::ErrGalleryNotFound(e) => Err(rejected("ErrGalleryNotFound", e)),
            Self::Other => Err(ApiError::unexpected("moveCollectionToGallery")),
        }
    }
}

// `data` shapes, one field per operation

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryByIdData {
    pub gallery_by_id: Option<GalleryByIdResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryData {
    pub update_gallery: Option<UpdateGalleryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishGalleryData {
    pub publish_gallery: Option<PublishGalleryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCollectionData {
    pub move_collection_to_gallery: Option<MoveCollectionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload_decodes() {
        let data: UpdateGalleryData = serde_json::from_str(
            r#"{
                "updateGallery": {
                    "__typename": "UpdateGalleryPayload",
                    "gallery": { "dbid": "g1", "collections": [] }
                }
            }"#,
        )
        .unwrap();

        let gallery = data.update_gallery.unwrap().into_result().unwrap();
        assert_eq!(gallery.dbid, "g1");
    }

    #[test]
    fn test_known_error_is_rejected() {
        let data: MoveCollectionData = serde_json::from_str(
            r#"{
                "moveCollectionToGallery": {
                    "__typename": "ErrCollectionNotFound",
                    "message": "no such collection"
                }
            }"#,
        )
        .unwrap();

        let err = data.move_collection_to_gallery.unwrap().into_result().unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                typename: "ErrCollectionNotFound".to_string(),
                message: "no such collection".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_typename_is_unexpected() {
        let data: PublishGalleryData = serde_json::from_str(
            r#"{ "publishGallery": { "__typename": "ErrSomethingNew", "message": "?" } }"#,
        )
        .unwrap();

        let err = data.publish_gallery.unwrap().into_result().unwrap_err();
        assert_eq!(err, ApiError::unexpected("publishGallery"));
    }

    #[test]
    fn test_top_level_errors_decode() {
        let response: GraphqlResponse<GalleryByIdData> = serde_json::from_str(
            r#"{ "data": null, "errors": [{ "message": "boom", "path": ["galleryById"] }] }"#,
        )
        .unwrap();

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "boom");
    }
}
