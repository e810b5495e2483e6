//! HTTP transport for the gallery GraphQL API

use crate::documents::{
    document, GALLERY_BY_ID, MOVE_COLLECTION_TO_GALLERY, PUBLISH_GALLERY, UPDATE_GALLERY,
};
use crate::envelope::{
    GalleryByIdData, GraphqlRequest, GraphqlResponse, MoveCollectionData, PublishGalleryData,
    UpdateGalleryData,
};
use async_trait::async_trait;
use gallery_common::{
    ApiError, ApiResult, GalleryApi, GalleryRecord, MoveCollectionToGalleryInput,
    PublishGalleryInput, UpdateGalleryInput,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

const USER_AGENT_VALUE: &str = concat!("gallery-sync/", env!("CARGO_PKG_VERSION"));

/// [`GalleryApi`] over GraphQL POST requests
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            auth_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<V, T>(&self, operation_name: &str, operation: &str, variables: V) -> ApiResult<T>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let query = document(operation);
        let body = GraphqlRequest {
            operation_name,
            query: &query,
            variables,
        };

        tracing::debug!(operation = operation_name, endpoint = %self.endpoint, "sending GraphQL request");

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(operation = operation_name, %status, "GraphQL request failed");
            return Err(ApiError::Transport(format!("HTTP {}: {}", status, text.trim())));
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let envelope: GraphqlResponse<T> = serde_json::from_slice(&bytes)?;

        if !envelope.errors.is_empty() {
            return Err(ApiError::GraphQL(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope.data.ok_or_else(|| ApiError::unexpected(operation_name))
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

#[async_trait]
impl GalleryApi for GraphqlClient {
    async fn fetch_gallery(&self, gallery_id: &str) -> ApiResult<GalleryRecord> {
        let data: GalleryByIdData = self
            .execute("GalleryById", GALLERY_BY_ID, json!({ "id": gallery_id }))
            .await?;

        data.gallery_by_id
            .ok_or_else(|| ApiError::unexpected("galleryById"))?
            .into_result()
    }

    async fn update_gallery(&self, input: UpdateGalleryInput) -> ApiResult<GalleryRecord> {
        let data: UpdateGalleryData = self
            .execute("UpdateGallery", UPDATE_GALLERY, json!({ "input": input }))
            .await?;

        data.update_gallery
            .ok_or_else(|| ApiError::unexpected("updateGallery"))?
            .into_result()
    }

    async fn publish_gallery(&self, input: PublishGalleryInput) -> ApiResult<()> {
        let data: PublishGalleryData = self
            .execute("PublishGallery", PUBLISH_GALLERY, json!({ "input": input }))
            .await?;

        data.publish_gallery
            .ok_or_else(|| ApiError::unexpected("publishGallery"))?
            .into_result()
    }

    async fn move_collection(&self, input: MoveCollectionToGalleryInput) -> ApiResult<()> {
        let data: MoveCollectionData = self
            .execute(
                "MoveCollectionToGallery",
                MOVE_COLLECTION_TO_GALLERY,
                json!({ "input": input }),
            )
            .await?;

        data.move_collection_to_gallery
            .ok_or_else(|| ApiError::unexpected("moveCollectionToGallery"))?
            .into_result()
    }
}
