//! Error types for the e2e fixture layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    /// Encoding, execution and parse faults, passed through unchanged
    #[error(transparent)]
    Bridge(#[from] fixture_bridge_common::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Page navigation to {url} failed: {source}")]
    Page {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

impl E2eError {
    /// The underlying bridge fault, if this error is one
    pub fn as_bridge(&self) -> Option<&fixture_bridge_common::Error> {
        match self {
            E2eError::Bridge(e) => Some(e),
            _ => None,
        }
    }
}
