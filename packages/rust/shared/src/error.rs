//! Error types for the question-group pipeline.
//!
//! Library crates use [`QGroupsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all question-group operations.
#[derive(Debug, thiserror::Error)]
pub enum QGroupsError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Frontmatter or YAML parsing error in a content document.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unexpected path shape, invalid value, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A declared author or guide id matched no record (strict mode only).
    #[error("unresolved reference: {message}")]
    Reference { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QGroupsError>;

impl QGroupsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a reference error from any displayable message.
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = QGroupsError::config("could not determine home directory");
        assert_eq!(
            err.to_string(),
            "config error: could not determine home directory"
        );

        let err = QGroupsError::reference("author `jdoe` not found");
        assert!(err.to_string().starts_with("unresolved reference:"));
        assert!(err.to_string().contains("jdoe"));
    }

    #[test]
    fn io_error_carries_path() {
        let err = QGroupsError::io(
            "/tmp/missing.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/missing.md"));
    }
}
