//! I/O related error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// I/O error with additional context
#[derive(Error, Debug)]
#[error("{}", format_io_error(self))]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Path associated with the error (if any)
    pub path: Option<PathBuf>,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoErrorKind {
    /// File or directory not found
    NotFound,
    /// Permission denied
    PermissionDenied,
    /// Generic I/O error
    Other,
}

impl IoError {
    /// Create a directory not found error
    pub fn directory_not_found(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::NotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create a not-found error with no path to report
    pub fn not_found() -> Self {
        Self {
            kind: IoErrorKind::NotFound,
            path: None,
            source: None,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: &Path, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::PermissionDenied,
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// Create an I/O error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source: Some(source),
        }
    }

    /// Attach the path the error occurred on
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn format_io_error(error: &IoError) -> String {
    match (&error.kind, &error.path) {
        (IoErrorKind::NotFound, Some(path)) => {
            format!("The directory \"{}\" was not found", path.display())
        }
        (IoErrorKind::NotFound, None) => "Directory not found".to_string(),
        (IoErrorKind::PermissionDenied, Some(path)) => {
            format!("Permission denied for: {}", path.display())
        }
        (IoErrorKind::PermissionDenied, None) => "Permission denied".to_string(),
        (IoErrorKind::Other, path) => {
            let mut message = match &error.source {
                Some(source) => format!("I/O error: {source}"),
                None => "I/O error".to_string(),
            };
            if let Some(path) = path {
                message.push_str(&format!(" ({})", path.display()));
            }
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_directory_not_found_error() {
        let path = Path::new("/test/missing");
        let error = IoError::directory_not_found(path);

        assert_eq!(error.kind, IoErrorKind::NotFound);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.source.is_none());
        assert!(error.to_string().contains("was not found"));
        assert!(error.to_string().contains("/test/missing"));
    }

    #[test]
    fn test_permission_denied_error() {
        let path = Path::new("/root/protected");
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = IoError::permission_denied(path, io_error);

        assert_eq!(error.kind, IoErrorKind::PermissionDenied);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.source.is_some());
        assert!(error.to_string().contains("Permission denied"));
        assert!(error.to_string().contains("/root/protected"));
    }

    #[test]
    fn test_from_std_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "Not found");
        let error = IoError::from_std(io_error);

        assert_eq!(error.kind, IoErrorKind::NotFound);
        assert!(error.path.is_none());
        assert!(error.source.is_some());
    }

    #[test]
    fn test_other_error_includes_path() {
        let io_error = io::Error::other("Generic error");
        let path = Path::new("/data/file.bin");
        let error = IoError::from_std(io_error).with_path(path);

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.to_string().contains("Generic error"));
        assert!(error.to_string().contains("/data/file.bin"));
    }
}
