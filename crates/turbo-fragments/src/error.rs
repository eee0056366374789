//! Content resolution error types.

use thiserror::Error;

/// Errors raised by content collaborators or configuration loading.
///
/// Fragment resolution logs these and continues with an empty result.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The content-tree query could not be executed.
    #[error("Content query failed: {0}")]
    Query(String),

    /// A multi-site-sync (blueprint / live copy) lookup failed.
    #[error("Live relationship lookup failed: {0}")]
    Relationship(String),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ContentError {
    fn from(e: toml::de::Error) -> Self {
        ContentError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Config(e.to_string())
    }
}
