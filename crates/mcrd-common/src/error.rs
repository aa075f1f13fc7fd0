//! Unified error type for the mcrd workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum McrdError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The rootless entry is not of the form `<name>:<uid>`.
    #[error("rootless entry must be in the format of \"<name>:<uid>\", got {value:?}")]
    InvalidRootless {
        /// The offending configuration value.
        value: String,
    },

    /// The version manifest service could not be queried.
    #[error("{message}")]
    Manifest {
        /// Description of the failure.
        message: String,
    },

    /// The requested version is not listed by the manifest service.
    #[error("invalid version: {version}")]
    InvalidVersion {
        /// Version identifier that was looked up.
        version: String,
    },

    /// An external program is not installed.
    #[error("{program} not found on PATH")]
    ProgramNotFound {
        /// Program name.
        program: String,
    },

    /// An external program could not be launched.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An external program exited unsuccessfully.
    #[error("`{command}` {}", describe_exit(.code))]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "was terminated by a signal".to_string(),
        |c| format!("exited with status {c}"),
    )
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, McrdError>;
