// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the annotation tooling.
//!
//! This module provides specialized error types for:
//! - Handlers directory discovery (missing or unreadable directories)
//! - Per-file reads, writes and backups performed by the applier
//! - Loading the optional YAML configuration file
//! - Building records and insertion patterns
//!
//! Per-file errors are cloneable so they can be stored in failure lists and
//! reported after the batch completes, instead of aborting it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating the handler files to process.
///
/// These are the only errors that stop a run before any file is touched.
#[derive(Error, Debug, Clone)]
pub enum ScanError {
    /// The handlers directory does not exist
    #[error("Handlers directory not found: {}", path.display())]
    HandlersDirNotFound {
        /// The directory that was expected to exist
        path: PathBuf,
    },

    /// The handlers directory exists but could not be listed
    #[error("Failed to read handlers directory {}: {reason}", path.display())]
    HandlersDirUnreadable {
        /// The directory that failed to list
        path: PathBuf,
        /// Underlying I/O error message
        reason: String,
    },

    /// `--file` named a file that is not among the handler files
    #[error("File not found: {name}")]
    TargetFileNotFound {
        /// File name given on the command line
        name: String,
    },
}

/// Errors raised while reading, backing up or writing a single handler file.
///
/// The applier records these in its failure list and moves on to the next file.
#[derive(Error, Debug, Clone)]
pub enum FileError {
    /// The file could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    ReadFailed {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error message
        reason: String,
    },

    /// The file is not valid UTF-8
    #[error("File {} is not valid UTF-8: {reason}", path.display())]
    InvalidEncoding {
        /// File with invalid content
        path: PathBuf,
        /// Decoder error message
        reason: String,
    },

    /// The backup copy could not be created
    #[error("Failed to create backup {} for {}: {reason}", backup.display(), path.display())]
    BackupFailed {
        /// Original file
        path: PathBuf,
        /// Intended backup location
        backup: PathBuf,
        /// Underlying I/O error message
        reason: String,
    },

    /// The updated content could not be written
    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailed {
        /// File that failed to write
        path: PathBuf,
        /// Underlying I/O error message
        reason: String,
    },
}

impl FileError {
    /// Classify an I/O error from reading `path` into [`FileError`].
    ///
    /// `std::fs::read_to_string` reports bad UTF-8 as `InvalidData`; that case
    /// becomes [`FileError::InvalidEncoding`] so it can be told apart in reports.
    #[must_use]
    pub fn from_read(path: &Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData {
            Self::InvalidEncoding {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        } else {
            Self::ReadFailed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }

    /// The file this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadFailed { path, .. }
            | Self::InvalidEncoding { path, .. }
            | Self::BackupFailed { path, .. }
            | Self::WriteFailed { path, .. } => path,
        }
    }
}

/// Errors raised while loading the YAML configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file {}: {reason}", path.display())]
    Unreadable {
        /// Configuration file path
        path: PathBuf,
        /// Underlying I/O error message
        reason: String,
    },

    /// The configuration file is not valid YAML for the expected schema
    #[error("Invalid config file {}: {reason}", path.display())]
    Invalid {
        /// Configuration file path
        path: PathBuf,
        /// Deserializer error message
        reason: String,
    },
}

/// Errors raised while building handler records or insertion patterns.
#[derive(Error, Debug, Clone)]
pub enum RecordError {
    /// The method attribute is not one of the five recognized HTTP methods
    #[error("Unsupported HTTP method '{method}'")]
    UnknownMethod {
        /// Attribute name as found in the source
        method: String,
    },

    /// An insertion pattern could not be compiled for a handler
    #[error("Failed to build pattern for handler '{function_name}': {reason}")]
    PatternFailed {
        /// Handler the pattern was built for
        function_name: String,
        /// Regex compiler error message
        reason: String,
    },
}

/// Unified error type for the annotation tooling.
#[derive(Error, Debug, Clone)]
pub enum AnnotatorError {
    /// Directory or target-file discovery error
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Per-file I/O error
    #[error(transparent)]
    File(#[from] FileError),

    /// Configuration loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Record or pattern construction error
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl AnnotatorError {
    /// Short machine-friendly code for this error, used in structured log fields.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Scan(ScanError::HandlersDirNotFound { .. }) => "HandlersDirNotFound",
            Self::Scan(ScanError::HandlersDirUnreadable { .. }) => "HandlersDirUnreadable",
            Self::Scan(ScanError::TargetFileNotFound { .. }) => "TargetFileNotFound",

            Self::File(FileError::ReadFailed { .. }) => "ReadFailed",
            Self::File(FileError::InvalidEncoding { .. }) => "InvalidEncoding",
            Self::File(FileError::BackupFailed { .. }) => "BackupFailed",
            Self::File(FileError::WriteFailed { .. }) => "WriteFailed",

            Self::Config(ConfigError::Unreadable { .. }) => "ConfigUnreadable",
            Self::Config(ConfigError::Invalid { .. }) => "ConfigInvalid",

            Self::Record(RecordError::UnknownMethod { .. }) => "UnknownMethod",
            Self::Record(RecordError::PatternFailed { .. }) => "PatternFailed",
        }
    }
}
