//! ECC-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, EccError>;

/// Top-level error type for the edit conflict cleaner.
#[derive(Debug, Error)]
pub enum EccError {
    #[error("[ECC-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ECC-1002] not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("[ECC-1003] directory does not exist: {path}")]
    MissingDirectory { path: PathBuf },

    #[error("[ECC-2001] cannot read directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ECC-3001] permission denied for {path}")]
    PermissionDenied { path: PathBuf },

    #[error("[ECC-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ECC-3003] failed to read confirmation: {details}")]
    Prompt { details: String },
}

impl EccError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "ECC-1001",
            Self::NotADirectory { .. } => "ECC-1002",
            Self::MissingDirectory { .. } => "ECC-1003",
            Self::Walk { .. } => "ECC-2001",
            Self::PermissionDenied { .. } => "ECC-3001",
            Self::Io { .. } => "ECC-3002",
            Self::Prompt { .. } => "ECC-3003",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Walk { .. } | Self::Prompt { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    ///
    /// `PermissionDenied` is split out so callers can report it without the
    /// raw OS message.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Traversal failure for a directory that could not be listed.
    #[must_use]
    pub fn walk(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Walk {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<EccError> {
        vec![
            EccError::InvalidConfig {
                details: String::new(),
            },
            EccError::NotADirectory {
                path: PathBuf::new(),
            },
            EccError::MissingDirectory {
                path: PathBuf::new(),
            },
            EccError::Walk {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            },
            EccError::PermissionDenied {
                path: PathBuf::new(),
            },
            EccError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            },
            EccError::Prompt {
                details: String::new(),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: Vec<&str> = all_variants().iter().map(EccError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_display_includes_code() {
        for err in all_variants() {
            let msg = err.to_string();
            assert!(
                msg.contains(err.code()),
                "display should contain error code: {msg}"
            );
        }
    }

    #[test]
    fn retryable_errors_are_correct() {
        assert!(
            EccError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            }
            .is_retryable()
        );
        assert!(
            !EccError::MissingDirectory {
                path: PathBuf::new()
            }
            .is_retryable()
        );
        assert!(
            !EccError::PermissionDenied {
                path: PathBuf::new()
            }
            .is_retryable()
        );
    }

    #[test]
    fn io_constructor_splits_permission_denied() {
        let err = EccError::io(
            "/tmp/locked.txt",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.code(), "ECC-3001");
        assert!(err.to_string().contains("/tmp/locked.txt"));

        let err = EccError::io(
            "/tmp/gone.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "ECC-3002");
        assert!(err.to_string().contains("gone"));
    }
}
