//! CLI error types.

use thiserror::Error;

/// Errors that stop the replay before it starts.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failed to read the script file.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// Script is not valid JSON or does not match the script schema.
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),

    /// A script step carries neither or both of `event` and `status`.
    #[error("script step {index} must set exactly one of `event` or `status`")]
    InvalidStep {
        /// Zero-based step index.
        index: usize,
    },

    /// A command-line option is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}
