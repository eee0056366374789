//! Transport error types.

use thiserror::Error;

/// Errors of a single HTTP exchange.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error("Request failed: {0}")]
    Send(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read as expected.
    #[error("Invalid response body: {0}")]
    Body(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Body(e.to_string())
    }
}

/// Errors raised while executing a GraphQL operation.
///
/// Errors reported by the server inside a well-formed response body are not
/// represented here; they travel in [`crate::GraphqlResponse::errors`].
#[derive(Error, Debug)]
pub enum GraphqlError {
    /// The underlying HTTP exchange failed.
    #[error("GraphQL transport failed: {0}")]
    Fetch(#[from] FetchError),

    /// The response body was not a GraphQL response document.
    #[error("Invalid GraphQL response: {0}")]
    Decode(String),

    /// Any other client-side failure (used by alternative clients).
    #[error("GraphQL client error: {0}")]
    Client(String),
}

impl From<serde_json::Error> for GraphqlError {
    fn from(e: serde_json::Error) -> Self {
        GraphqlError::Decode(e.to_string())
    }
}
