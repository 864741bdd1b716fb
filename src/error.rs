//! Error types for the video shelf

use std::path::PathBuf;
use thiserror::Error;

/// Error kinds that can occur while scanning or renaming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfErrorKind {
    /// File or directory not found
    NotFound,
    /// Permission denied when accessing a file or directory
    AccessDenied,
    /// Filesystem rejected a rename (target exists, cross-device, ...)
    RenameFailed,
    /// Path cannot be used for the requested operation
    InvalidPath,
    /// Argument outside its valid range
    InvalidArgument,
    /// Key-value store operation failed
    StoreError,
    /// Persisted value could not be encoded or decoded
    SerializationError,
    /// Any other I/O error
    IoError,
}

/// Represents an error returned by a shelf operation
#[derive(Debug, Error)]
#[error("{kind:?}: {message} (path: {path:?})")]
pub struct ShelfError {
    /// The kind of error
    pub kind: ShelfErrorKind,
    /// The path where the error occurred
    pub path: Option<PathBuf>,
    /// Human-readable error message
    pub message: String,
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ShelfError>;

impl ShelfError {
    /// Create a new shelf error
    pub fn new(kind: ShelfErrorKind, path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(path: PathBuf) -> Self {
        Self::new(
            ShelfErrorKind::NotFound,
            Some(path.clone()),
            format!("Not found: {:?}", path),
        )
    }

    /// Create an access denied error
    pub fn access_denied(path: PathBuf) -> Self {
        Self::new(
            ShelfErrorKind::AccessDenied,
            Some(path.clone()),
            format!("Access denied: {:?}", path),
        )
    }

    /// Create a rename failure
    pub fn rename_failed(path: PathBuf, message: impl Into<String>) -> Self {
        Self::new(ShelfErrorKind::RenameFailed, Some(path), message)
    }

    /// Create an invalid path error
    pub fn invalid_path(path: PathBuf, message: impl Into<String>) -> Self {
        Self::new(ShelfErrorKind::InvalidPath, Some(path), message)
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ShelfErrorKind::InvalidArgument, None, message)
    }

    /// Create a store error
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::new(ShelfErrorKind::StoreError, None, message)
    }

    /// Map an I/O error raised while touching `path`
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::access_denied(path),
            _ => Self::new(ShelfErrorKind::IoError, Some(path), err.to_string()),
        }
    }

    /// Map an I/O error raised by `fs::rename(from, ..)`
    ///
    /// Missing source and permission problems keep their own kinds, everything
    /// else the filesystem rejects is a `RenameFailed`.
    pub fn from_rename(err: std::io::Error, from: impl Into<PathBuf>) -> Self {
        let from = from.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(from),
            std::io::ErrorKind::PermissionDenied => Self::access_denied(from),
            _ => Self::rename_failed(from, err.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ShelfErrorKind::NotFound
    }
}

impl From<std::io::Error> for ShelfError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => ShelfErrorKind::AccessDenied,
            std::io::ErrorKind::NotFound => ShelfErrorKind::NotFound,
            _ => ShelfErrorKind::IoError,
        };
        Self::new(kind, None, err.to_string())
    }
}

impl From<walkdir::Error> for ShelfError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf());
        let kind = match err.io_error().map(|e| e.kind()) {
            Some(std::io::ErrorKind::PermissionDenied) => ShelfErrorKind::AccessDenied,
            Some(std::io::ErrorKind::NotFound) => ShelfErrorKind::NotFound,
            _ => ShelfErrorKind::IoError,
        };
        Self::new(kind, path, err.to_string())
    }
}

impl From<rusqlite::Error> for ShelfError {
    fn from(err: rusqlite::Error) -> Self {
        Self::store_error(err.to_string())
    }
}

impl From<serde_json::Error> for ShelfError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ShelfErrorKind::SerializationError, None, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_kinds() {
        let err: ShelfError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind, ShelfErrorKind::NotFound);

        let err: ShelfError = io::Error::new(io::ErrorKind::PermissionDenied, "no").into();
        assert_eq!(err.kind, ShelfErrorKind::AccessDenied);

        let err: ShelfError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert_eq!(err.kind, ShelfErrorKind::IoError);
    }

    #[test]
    fn test_rename_error_mapping() {
        let err = ShelfError::from_rename(
            io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
            "/a/b.mp4",
        );
        assert_eq!(err.kind, ShelfErrorKind::RenameFailed);
        assert_eq!(err.path, Some(PathBuf::from("/a/b.mp4")));

        let err = ShelfError::from_rename(io::Error::new(io::ErrorKind::NotFound, "x"), "/a");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = ShelfError::not_found(PathBuf::from("/missing"));
        assert!(err.to_string().starts_with("NotFound"));
    }
}
