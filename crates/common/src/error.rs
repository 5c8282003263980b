//! Error types shared across multitouch crates.
//!
//! The gesture detectors themselves never fail; these errors cover the
//! edges around them: reading event streams and adapting raw contacts.

use std::path::PathBuf;

/// Top-level error type for multitouch operations.
#[derive(Debug, thiserror::Error)]
pub enum MultitouchError {
    #[error("Event stream error at line {line}: {message}")]
    Stream { line: usize, message: String },

    #[error("Input adapter error: {message}")]
    Adapter { message: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MultitouchError.
pub type MultitouchResult<T> = Result<T, MultitouchError>;

impl MultitouchError {
    pub fn stream(line: usize, msg: impl Into<String>) -> Self {
        Self::Stream {
            line,
            message: msg.into(),
        }
    }

    pub fn adapter(msg: impl Into<String>) -> Self {
        Self::Adapter {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_error_mentions_line() {
        let err = MultitouchError::stream(7, "bad pointer list");
        assert_eq!(
            err.to_string(),
            "Event stream error at line 7: bad pointer list"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> MultitouchResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(MultitouchError::Io(_))));
    }
}
