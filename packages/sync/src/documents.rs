//! GraphQL documents sent to the gallery backend.
//!
//! Every result field selects `__typename` so the response can be decoded
//! into a tagged enum.

pub const GALLERY_FIELDS: &str = r#"
fragment GalleryFields on Gallery {
  dbid
  name
  description
  collections {
    dbid
    name
    collectorsNote
    hidden
    tokens {
      dbid
    }
    layout {
      sections
      sectionLayout {
        columns
        whitespace
      }
    }
    tokenSettings {
      tokenId
      renderLive
      highDefinition
    }
  }
}
"#;

pub const GALLERY_BY_ID: &str = r#"
query GalleryById($id: DBID!) {
  galleryById(id: $id) {
    __typename
    ... on Gallery {
      ...GalleryFields
    }
    ... on Error {
      message
    }
  }
}
"#;

pub const UPDATE_GALLERY: &str = r#"
mutation UpdateGallery($input: UpdateGalleryInput!) {
  updateGallery(input: $input) {
    __typename
    ... on UpdateGalleryPayload {
      gallery {
        ...GalleryFields
      }
    }
    ... on Error {
      message
    }
  }
}
"#;

pub const PUBLISH_GALLERY: &str = r#"
mutation PublishGallery($input: PublishGalleryInput!) {
  publishGallery(input: $input) {
    __typename
    ... on Error {
      message
    }
  }
}
"#;

pub const MOVE_COLLECTION_TO_GALLERY: &str = r#"
mutation MoveCollectionToGallery($input: MoveCollectionToGalleryInput!) {
  moveCollectionToGallery(input: $input) {
    __typename
    ... on Error {
      message
    }
  }
}
"#;

/// Operation document with the gallery fragment appended when it's used
pub fn document(operation: &str) -> String {
    if operation.contains("...GalleryFields") {
        format!("{}{}", operation, GALLERY_FIELDS)
    } else {
        operation.to_string()
    }
}
