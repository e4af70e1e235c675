use thiserror::Error;

/// Unified error type for fatal relver failures.
///
/// Per-commit problems (malformed messages, gate rejections) are not errors
/// at this level; they are collected into the batch report so a single run
/// can surface every offending commit at once.
#[derive(Error, Debug)]
pub enum RelverError {
    #[error("Version error: {0}")]
    Version(String),

    #[error("Empty commit batch: at least one commit message is required")]
    EmptyBatch,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in relver
pub type Result<T> = std::result::Result<T, RelverError>;

impl RelverError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        RelverError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RelverError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        RelverError::Tag(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelverError::config("missing policy table");
        assert_eq!(err.to_string(), "Configuration error: missing policy table");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RelverError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(RelverError::version("negative component")
            .to_string()
            .contains("Version"));
        assert!(RelverError::tag("bad pattern").to_string().contains("Tag"));
    }

    #[test]
    fn test_empty_batch_message() {
        let err = RelverError::EmptyBatch;
        assert!(err.to_string().contains("at least one commit"));
    }
}
