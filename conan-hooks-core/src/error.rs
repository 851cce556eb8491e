//! Error types for conan-hooks-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing core domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The text is not of the form `name/version[@user/channel]`.
    #[error("invalid package reference '{input}': {reason}")]
    InvalidReference { input: String, reason: &'static str },
}

/// Errors while loading the optional YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors delegating recipe inspection to the host package manager.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The inspection program could not be started at all.
    #[error("could not run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The inspection program ran and exited unsuccessfully.
    #[error("recipe inspection of {path} failed ({status}): {stderr}")]
    Failed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode recipe attributes from {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Failure reported by a lifecycle hook back to the host.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("hook '{hook}' failed: {reason}")]
    ExecutionFailed { hook: String, reason: String },
}

impl HookError {
    pub fn failed(hook: impl Into<String>, reason: impl ToString) -> Self {
        HookError::ExecutionFailed {
            hook: hook.into(),
            reason: reason.to_string(),
        }
    }
}
