//! Error types shared across headtrack crates.

use std::path::PathBuf;

/// Top-level error type for headtrack operations.
///
/// Every variant is fatal to a conversion run: there is no line-level
/// recovery and no partial output.
#[derive(Debug, thiserror::Error)]
pub enum HeadtrackError {
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Timestamp parse error at line {line}: {message}")]
    TimestampParse { line: usize, message: String },

    #[error("Orientation parse error: {message}")]
    OrientationParse { message: String },

    #[error("Log contains no data records: {path}")]
    EmptyLog { path: PathBuf },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HeadtrackError.
pub type HeadtrackResult<T> = Result<T, HeadtrackError>;

impl HeadtrackError {
    pub fn malformed_record(line: usize, msg: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: msg.into(),
        }
    }

    pub fn timestamp_parse(line: usize, msg: impl Into<String>) -> Self {
        Self::TimestampParse {
            line,
            message: msg.into(),
        }
    }

    pub fn orientation_parse(msg: impl Into<String>) -> Self {
        Self::OrientationParse {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Attach a line number to an error raised without line context.
    ///
    /// Orientation failures become `MalformedRecord`; timestamp errors get
    /// their line replaced. Everything else passes through unchanged.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::OrientationParse { message } => Self::MalformedRecord { line, message },
            Self::MalformedRecord { message, .. } => Self::MalformedRecord { line, message },
            Self::TimestampParse { message, .. } => Self::TimestampParse { line, message },
            other => other,
        }
    }

    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. } | Self::TimestampParse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
