//! # Gallery Sync
//!
//! GraphQL-over-HTTP implementation of [`gallery_common::GalleryApi`].
//!
//! ```rust,ignore
//! use gallery_sync::GraphqlClient;
//!
//! let client = GraphqlClient::new("https://api.example.com/glry/graphql/query")?
//!     .with_auth_token(token);
//! let gallery = client.fetch_gallery("gallery-1").await?;
//! ```

pub mod client;
pub mod documents;
pub mod envelope;

pub use client::GraphqlClient;
