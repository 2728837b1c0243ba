//! Error types for the fixture bridge

use thiserror::Error;

/// Result type alias using the bridge Error
pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while encoding, executing or parsing a fixture command.
///
/// None of these are retried or reinterpreted by the bridge; they reach the
/// calling test exactly as raised.
#[derive(Error, Debug)]
pub enum Error {
    /// The fixture value could not be serialized. Raised before any process
    /// is launched.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The execution channel could not launch the external process at all.
    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran and reported failure.
    #[error("Command `{command}` failed ({status}):\nstdout: {stdout}\nstderr: {stderr}")]
    Execution {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    /// An argument would not survive the single-string shell contract.
    #[error("Unsafe argument {argument:?}: {reason}")]
    UnsafeArgument { argument: String, reason: String },

    /// Output declared as JSON did not parse.
    #[error("Parse error: {message}\nraw output: {raw}")]
    Parse { message: String, raw: String },
}

impl Error {
    /// Whether this fault came from launching or running the external tool.
    pub fn is_execution_fault(&self) -> bool {
        matches!(
            self,
            Error::Spawn { .. } | Error::Execution { .. } | Error::UnsafeArgument { .. }
        )
    }
}
