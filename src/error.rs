//! Error types for configuration resolution and command execution.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading or reading resolved settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The env file was required but could not be read.
    #[error("error reading env file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the env file is malformed. Nothing from the file is applied.
    #[error("error parsing env file {}, line {line}: {reason}", .path.display())]
    FileParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The file source was already populated for this invocation.
    #[error("env file already loaded from {}", .path.display())]
    FileAlreadyLoaded { path: PathBuf },

    /// A resolved value does not convert to the requested type.
    #[error("cannot convert {key}={value:?} to {expected}")]
    TypeConversion {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Failures surfaced by a command body.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The execution context was cancelled while the command was running.
    #[error("context canceled")]
    Cancelled,

    #[error("{left} + {right} overflows")]
    Overflow { left: i64, right: i64 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for command bodies.
pub type CommandResult<T = ()> = std::result::Result<T, CommandError>;
