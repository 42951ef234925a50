use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for the batch tagger.
///
/// Each variant carries the path and the step that failed, so the binary can
/// report a precise message and recover the tool's exit status without
/// parsing error strings.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid glob pattern: {pattern}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Filesystem error: {operation} failed for {path:?}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch attribute tool `{program}`")]
    ToolLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Attribute tool failed on {path:?} ({})", describe_exit(.code))]
    ToolFailed { path: PathBuf, code: Option<i32> },

    #[error("Validation error: {field} {reason}")]
    Validation { field: String, reason: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl TagError {
    /// Exit status the process should report for this error.
    ///
    /// A failing tool's own exit code is passed through unchanged; everything
    /// else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;

/// Convert anyhow errors to configuration errors.
impl From<anyhow::Error> for TagError {
    fn from(err: anyhow::Error) -> Self {
        TagError::Configuration {
            message: err.to_string(),
        }
    }
}

/// Convert I/O errors to filesystem errors.
///
/// Call sites that know the path and operation build
/// `TagError::FileSystem` directly; this is the fallback for the rest.
impl From<std::io::Error> for TagError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("unknown"),
            operation: "unknown".to_string(),
            source: err,
        }
    }
}
