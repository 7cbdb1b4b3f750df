//! Error types for evalboard
//!
//! Only structural problems surface as errors: unreadable files, invalid
//! JSON/YAML, or an unusable configuration. Missing results and malformed
//! metric values are treated as absent data and never reach this type.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for evalboard operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Main error type for evalboard
#[derive(Error, Debug)]
pub enum BoardError {
    /// A file or directory could not be read or written
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A result document or report could not be (de)serialized
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A setup file could not be parsed
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration is structurally valid but unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoardError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn yaml(path: impl AsRef<Path>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_path() {
        let err = BoardError::io(
            "results/model/x.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("results/model/x.json"));
        assert!(msg.contains("gone"));

        let err = BoardError::config("empty benchmark setup");
        assert_eq!(err.to_string(), "Configuration error: empty benchmark setup");
    }
}
