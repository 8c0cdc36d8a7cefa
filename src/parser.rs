// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Handler discovery and record extraction.
//!
//! The parser walks a handlers directory, reads every `*_handlers.rs` file and
//! turns each route-attributed handler into a [`HandlerRecord`].
//!
//! # Extraction
//!
//! A handler is recognized only when its route attribute is immediately
//! followed by the function declaration:
//!
//! ```text
//! #[get("/buildings/{id}")]
//! pub async fn get_building(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
//! ```
//!
//! Anything else (doc comments between attribute and function, other return
//! types, non-`pub` functions) is skipped without notice. Missing a handler is
//! preferred over annotating something that is not one.
//!
//! The matching strategy sits behind [`RecordExtractor`] so it can be replaced
//! without touching the generator or the applier.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TagMapping;
use crate::constants::{HANDLER_FILE_SUFFIX, MODULE_FILE_NAME};
use crate::errors::{FileError, ScanError};
use crate::handler::{HandlerRecord, HttpMethod};

/// Route attribute, then whitespace, then `pub async fn name(params) -> impl Responder`.
///
/// The parameter list may span lines but never contains `{`, `}` or `;`, so a
/// match cannot run past the end of one declaration into the next handler.
static HANDLER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"#\[(get|post|put|delete|patch)\("([^"]+)"\)\]\s*pub async fn (\w+)\(([^{};]*?)\) -> impl Responder"#,
    )
    .expect("handler pattern is a valid regex")
});

/// Turns the text of one handler file into records.
pub trait RecordExtractor {
    /// Extract every recognized handler from `text`, tagging each with `tag`.
    fn extract_records(&self, text: &str, tag: &str) -> Vec<HandlerRecord>;
}

/// Regex-based [`RecordExtractor`] over Actix-web route attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl RecordExtractor for RegexExtractor {
    fn extract_records(&self, text: &str, tag: &str) -> Vec<HandlerRecord> {
        HANDLER_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                let method = match caps[1].parse::<HttpMethod>() {
                    Ok(method) => method,
                    Err(e) => {
                        debug!(error = %e, "Skipping handler with unsupported method");
                        return None;
                    }
                };
                Some(HandlerRecord::new(
                    method,
                    &caps[2],
                    &caps[3],
                    split_parameters(&caps[4]),
                    tag,
                ))
            })
            .collect()
    }
}

/// Split a parameter list on top-level commas.
///
/// Commas nested inside `<...>` belong to a generic argument list and do not
/// split. Empty trailing segments (from a trailing comma) are dropped and each
/// parameter is trimmed.
///
/// # Example
///
/// ```rust
/// use openapi_annotator::parser::split_parameters;
///
/// let params = split_parameters("state: web::Data<AppState>, body: web::Json<HashMap<String, u32>>,");
/// assert_eq!(params, vec!["state: web::Data<AppState>", "body: web::Json<HashMap<String, u32>>"]);
/// ```
#[must_use]
pub fn split_parameters(params: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in params.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.trim().is_empty() {
        result.push(current.trim().to_string());
    }

    result
}

/// Records extracted from one handler file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub tag: String,
    pub records: Vec<HandlerRecord>,
}

impl ParsedFile {
    /// File name for display, e.g. `building_handlers.rs`.
    #[must_use]
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Result of scanning a handlers directory.
///
/// Unreadable files do not abort the scan; they are listed in `failures`.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub files: Vec<ParsedFile>,
    pub failures: Vec<FileError>,
}

impl ScanOutcome {
    /// All records, in file order then source order.
    pub fn records(&self) -> impl Iterator<Item = &HandlerRecord> {
        self.files.iter().flat_map(|file| file.records.iter())
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.files.iter().map(|file| file.records.len()).sum()
    }
}

/// Reads handler files and extracts records with a tag mapping fixed at construction.
#[derive(Debug, Clone)]
pub struct HandlerParser<E = RegexExtractor> {
    tags: TagMapping,
    extractor: E,
}

impl HandlerParser<RegexExtractor> {
    #[must_use]
    pub fn new(tags: TagMapping) -> Self {
        Self::with_extractor(tags, RegexExtractor)
    }
}

impl<E: RecordExtractor> HandlerParser<E> {
    #[must_use]
    pub fn with_extractor(tags: TagMapping, extractor: E) -> Self {
        Self { tags, extractor }
    }

    /// Tag for a handler file, resolved from its stem.
    #[must_use]
    pub fn tag_for(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.tags.resolve(&stem)
    }

    /// Extract records from already-loaded file text.
    #[must_use]
    pub fn parse_text(&self, path: &Path, text: &str) -> ParsedFile {
        let tag = self.tag_for(path);
        let records = self.extractor.extract_records(text, &tag);
        ParsedFile {
            path: path.to_path_buf(),
            tag,
            records,
        }
    }

    /// Read and parse a single handler file.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::ReadFailed`] or [`FileError::InvalidEncoding`] if
    /// the file cannot be loaded as UTF-8 text.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile, FileError> {
        let text = std::fs::read_to_string(path).map_err(|e| FileError::from_read(path, &e))?;
        Ok(self.parse_text(path, &text))
    }

    /// Parse every handler file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] only when the directory itself is missing or
    /// cannot be listed. Per-file failures are collected in the outcome.
    pub fn scan_directory(&self, dir: &Path) -> Result<ScanOutcome, ScanError> {
        let mut outcome = ScanOutcome::default();

        for path in discover_handler_files(dir)? {
            match self.parse_file(&path) {
                Ok(parsed) => {
                    debug!(
                        file = %parsed.file_name(),
                        handlers = parsed.records.len(),
                        "Parsed handler file"
                    );
                    outcome.files.push(parsed);
                }
                Err(e) => {
                    warn!(
                        file = %display_name(&path),
                        error = %e,
                        "Skipping unreadable handler file"
                    );
                    outcome.failures.push(e);
                }
            }
        }

        Ok(outcome)
    }
}

/// List the `*_handlers.rs` files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into and `mod.rs` is never returned.
///
/// # Errors
///
/// Returns [`ScanError::HandlersDirNotFound`] if `dir` is not a directory and
/// [`ScanError::HandlersDirUnreadable`] if it cannot be listed.
pub fn discover_handler_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::HandlersDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ScanError::HandlersDirUnreadable {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name == MODULE_FILE_NAME || !name.ends_with(HANDLER_FILE_SUFFIX) {
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

/// File name of `path` for messages, falling back to the full path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
