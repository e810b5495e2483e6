use thiserror::Error;

/// Failure of a single round trip to the gallery API.
///
/// A call either returns the expected success payload or one of these.
/// Nothing is partially applied on the client side.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    #[error("{typename}: {message}")]
    Rejected { typename: String, message: String },

    #[error("Unexpected response for {operation}")]
    UnexpectedResponse { operation: String },
}

impl ApiError {
    pub fn unexpected(operation: impl Into<String>) -> Self {
        ApiError::UnexpectedResponse {
            operation: operation.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Transport(format!("Malformed response body: {}", e))
    }
}
