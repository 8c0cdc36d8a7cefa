// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for error types.

#[cfg(test)]
mod tests {
    use crate::errors::*;
    use std::io;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::HandlersDirNotFound {
            path: PathBuf::from("src/handlers"),
        };
        assert_eq!(err.to_string(), "Handlers directory not found: src/handlers");

        let err = ScanError::TargetFileNotFound {
            name: "ghost_handlers.rs".to_string(),
        };
        assert_eq!(err.to_string(), "File not found: ghost_handlers.rs");
    }

    #[test]
    fn test_file_error_display() {
        let err = FileError::BackupFailed {
            path: PathBuf::from("a_handlers.rs"),
            backup: PathBuf::from("a_handlers.rs.bak"),
            reason: "read-only file system".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create backup a_handlers.rs.bak for a_handlers.rs: read-only file system"
        );
    }

    #[test]
    fn test_from_read_classifies_invalid_data() {
        let path = Path::new("broken_handlers.rs");

        let invalid = io::Error::new(io::ErrorKind::InvalidData, "bad utf-8");
        let err = FileError::from_read(path, &invalid);
        assert!(matches!(err, FileError::InvalidEncoding { .. }));

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = FileError::from_read(path, &denied);
        match &err {
            FileError::ReadFailed { reason, .. } => assert_eq!(reason, "denied"),
            other => panic!("expected ReadFailed, got {other:?}"),
        }
        assert_eq!(err.path(), path);
    }

    #[test]
    fn test_unified_error_is_transparent() {
        let inner = RecordError::UnknownMethod {
            method: "head".to_string(),
        };
        let err: AnnotatorError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.to_string(), "Unsupported HTTP method 'head'");
    }

    #[test]
    fn test_error_codes() {
        let err: AnnotatorError = FileError::InvalidEncoding {
            path: PathBuf::from("f.rs"),
            reason: "bad".to_string(),
        }
        .into();
        assert_eq!(err.code(), "InvalidEncoding");

        let err: AnnotatorError = ConfigError::Unreadable {
            path: PathBuf::from("c.yaml"),
            reason: "missing".to_string(),
        }
        .into();
        assert_eq!(err.code(), "ConfigUnreadable");

        let err: AnnotatorError = ScanError::TargetFileNotFound {
            name: "x".to_string(),
        }
        .into();
        assert_eq!(err.code(), "TargetFileNotFound");
    }
}
