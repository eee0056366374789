//! Commerce error types.

use thiserror::Error;

/// Errors that can occur while retrieving catalog data.
///
/// Retrievers never hand these to their callers; they are logged and turned
/// into "no entity".
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The GraphQL exchange failed.
    #[error("Catalog transport error: {0}")]
    Transport(#[from] turbo_data::GraphqlError),

    /// The response had a list field, but it was not shaped as expected.
    #[error("Unexpected catalog response shape: {0}")]
    UnexpectedShape(String),

    /// An entity could not be decoded.
    #[error("Failed to decode {entity}: {message}")]
    Decode {
        entity: &'static str,
        message: String,
    },
}
