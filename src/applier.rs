// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Insertion of annotation blocks into handler source files.
//!
//! For every record the applier looks for the route attribute directly
//! followed by the handler declaration and inserts the rendered block in front
//! of the attribute:
//!
//! ```text
//! #[utoipa::path(          <- inserted
//!     ...                  <- inserted
//! )]                       <- inserted
//! #[get("/buildings/{id}")]
//! pub async fn get_building(
//! ```
//!
//! If that sequence is not found, the applier falls back to the bare
//! declaration and inserts in front of the attribute directly above it. A
//! record matching neither pattern is left alone and counted as not found.
//!
//! A record whose insertion point is already preceded by an annotation block
//! is skipped, so running the applier twice changes nothing the second time.
//!
//! # File handling
//!
//! Files are processed one at a time. A file that cannot be read, backed up
//! or written is logged and added to the failure list; the batch continues.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::constants::ANNOTATION_MARKER;
use crate::errors::{AnnotatorError, FileError, RecordError, ScanError};
use crate::generator::AnnotationGenerator;
use crate::handler::HandlerRecord;
use crate::parser::{discover_handler_files, display_name, HandlerParser, RecordExtractor};

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A block was inserted
    Applied,
    /// An annotation block already precedes the handler
    AlreadyAnnotated,
    /// Neither the attribute+declaration nor the bare declaration was found
    PatternNotFound,
}

/// Per-outcome record counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    pub applied: usize,
    pub already_annotated: usize,
    pub not_found: usize,
}

impl RecordCounts {
    pub fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Applied => self.applied += 1,
            RecordOutcome::AlreadyAnnotated => self.already_annotated += 1,
            RecordOutcome::PatternNotFound => self.not_found += 1,
        }
    }

    pub fn merge(&mut self, other: RecordCounts) {
        self.applied += other.applied;
        self.already_annotated += other.already_annotated;
        self.not_found += other.not_found;
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.applied + self.already_annotated + self.not_found
    }
}

/// Result of applying records to a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUpdate {
    pub content: String,
    pub changed: bool,
    /// One entry per record, in record order
    pub outcomes: Vec<(String, RecordOutcome)>,
}

impl TextUpdate {
    #[must_use]
    pub fn counts(&self) -> RecordCounts {
        let mut counts = RecordCounts::default();
        for (_, outcome) in &self.outcomes {
            counts.record(*outcome);
        }
        counts
    }
}

/// Applier switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Detect and report only; never write files or backups
    pub dry_run: bool,
    /// Copy the original to `<file><backup_suffix>` before writing
    pub create_backup: bool,
    pub backup_suffix: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            create_backup: true,
            backup_suffix: crate::constants::DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The parser found no handlers in the file
    NoHandlers,
    /// Every record was already annotated or not found
    Unchanged,
    /// Changes were detected in dry-run mode and not written
    WouldModify,
    /// The file was rewritten; `backup` is set when a backup was created
    Modified { backup: Option<PathBuf> },
}

/// Report for one processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub handlers: usize,
    pub counts: RecordCounts,
}

/// A file that could not be processed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: AnnotatorError,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct ApplySummary {
    pub dry_run: bool,
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl ApplySummary {
    /// Files written, or that would be written in dry-run mode.
    pub fn modified_files(&self) -> impl Iterator<Item = &Path> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, FileStatus::Modified { .. } | FileStatus::WouldModify))
            .map(|r| r.path.as_path())
    }

    #[must_use]
    pub fn modified_count(&self) -> usize {
        self.modified_files().count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Files skipped because no handler was recognized.
    #[must_use]
    pub fn no_handler_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status == FileStatus::NoHandlers)
            .count()
    }

    /// Record counters across all processed files.
    #[must_use]
    pub fn record_counts(&self) -> RecordCounts {
        let mut counts = RecordCounts::default();
        for report in &self.reports {
            counts.merge(report.counts);
        }
        counts
    }
}

/// Inserts rendered annotation blocks into handler files.
#[derive(Debug, Clone)]
pub struct AnnotationApplier {
    generator: AnnotationGenerator,
    options: ApplyOptions,
}

impl AnnotationApplier {
    #[must_use]
    pub fn new(generator: AnnotationGenerator, options: ApplyOptions) -> Self {
        Self { generator, options }
    }

    /// Apply every record to `text`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::PatternFailed`] if an insertion pattern cannot be
    /// compiled for one of the records.
    pub fn apply_to_text(
        &self,
        text: &str,
        records: &[HandlerRecord],
    ) -> Result<TextUpdate, RecordError> {
        let mut content = text.to_string();
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            let block = self.generator.render(record);
            let outcome = insert_annotation(&mut content, record, &block)?;
            debug!(
                handler = record.function_name(),
                outcome = ?outcome,
                "Processed handler"
            );
            outcomes.push((record.function_name().to_string(), outcome));
        }

        Ok(TextUpdate {
            changed: content != text,
            content,
            outcomes,
        })
    }

    /// Apply `records` to the file at `path`, backing it up and writing it
    /// unless this is a dry run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, backed up or written, or if
    /// an insertion pattern cannot be built.
    pub fn apply_to_file(
        &self,
        path: &Path,
        records: &[HandlerRecord],
    ) -> Result<FileReport, AnnotatorError> {
        let text = std::fs::read_to_string(path).map_err(|e| FileError::from_read(path, &e))?;
        self.apply_loaded(path, &text, records)
    }

    fn apply_loaded(
        &self,
        path: &Path,
        text: &str,
        records: &[HandlerRecord],
    ) -> Result<FileReport, AnnotatorError> {
        let name = display_name(path);
        let update = self.apply_to_text(text, records)?;
        let counts = update.counts();

        let status = if !update.changed {
            info!(file = %name, "No changes needed");
            FileStatus::Unchanged
        } else if self.options.dry_run {
            info!(
                file = %name,
                handlers = records.len(),
                annotated = counts.applied,
                "[DRY RUN] Would modify file"
            );
            FileStatus::WouldModify
        } else {
            let backup = if self.options.create_backup {
                let backup = backup_path(path, &self.options.backup_suffix);
                if backup == path {
                    return Err(FileError::BackupFailed {
                        path: path.to_path_buf(),
                        backup,
                        reason: "backup path is the file itself".to_string(),
                    }
                    .into());
                }
                std::fs::copy(path, &backup).map_err(|e| FileError::BackupFailed {
                    path: path.to_path_buf(),
                    backup: backup.clone(),
                    reason: e.to_string(),
                })?;
                info!(file = %name, backup = %display_name(&backup), "Backup created");
                Some(backup)
            } else {
                None
            };

            std::fs::write(path, &update.content).map_err(|e| FileError::WriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            info!(
                file = %name,
                handlers = records.len(),
                annotated = counts.applied,
                "Modified file"
            );
            FileStatus::Modified { backup }
        };

        Ok(FileReport {
            path: path.to_path_buf(),
            status,
            handlers: records.len(),
            counts,
        })
    }

    /// Process every handler file in `handlers_dir`, or only `target_file`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] when the directory is missing or unreadable, or
    /// when `target_file` names no handler file. Per-file failures are
    /// returned inside the summary.
    pub fn apply_to_all<E: RecordExtractor>(
        &self,
        parser: &HandlerParser<E>,
        handlers_dir: &Path,
        target_file: Option<&str>,
    ) -> Result<ApplySummary, ScanError> {
        let mut files = discover_handler_files(handlers_dir)?;

        if let Some(target) = target_file {
            files.retain(|f| display_name(f) == target);
            if files.is_empty() {
                return Err(ScanError::TargetFileNotFound {
                    name: target.to_string(),
                });
            }
        }

        info!(files = files.len(), "Processing handler files");

        let mut summary = ApplySummary {
            dry_run: self.options.dry_run,
            ..ApplySummary::default()
        };

        for path in files {
            let name = display_name(&path);
            debug!(file = %name, "Processing file");

            let result = std::fs::read_to_string(&path)
                .map_err(|e| AnnotatorError::from(FileError::from_read(&path, &e)))
                .and_then(|text| {
                    let parsed = parser.parse_text(&path, &text);
                    if parsed.records.is_empty() {
                        warn!(file = %name, "No handlers found");
                        return Ok(FileReport {
                            path: path.clone(),
                            status: FileStatus::NoHandlers,
                            handlers: 0,
                            counts: RecordCounts::default(),
                        });
                    }
                    self.apply_loaded(&path, &text, &parsed.records)
                });

            match result {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!(file = %name, code = e.code(), error = %e, "Error processing file");
                    summary.failures.push(FileFailure { path, error: e });
                }
            }
        }

        Ok(summary)
    }
}

/// `<path><suffix>`, e.g. `auth_handlers.rs.bak`.
#[must_use]
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Insert `block` for `record` into `content`.
fn insert_annotation(
    content: &mut String,
    record: &HandlerRecord,
    block: &str,
) -> Result<RecordOutcome, RecordError> {
    let function = regex::escape(record.function_name());
    let attribute = format!(
        r#"#\[{}\("{}"\)\]"#,
        record.method().attribute(),
        regex::escape(record.path())
    );
    let has_annotations = content.contains(ANNOTATION_MARKER);

    let primary = compile(
        record,
        &format!(r"{attribute}\s*\n(?:pub async fn {function}\()"),
    )?;
    let fallback = compile(
        record,
        &format!(r"#\[[^\]]+\]\s*\n(?:pub async fn {function}\()"),
    )?;

    let Some(position) = primary
        .find(content)
        .or_else(|| fallback.find(content))
        .map(|m| m.start())
    else {
        return Ok(RecordOutcome::PatternNotFound);
    };

    if has_annotations && preceded_by_annotation(content, position) {
        return Ok(RecordOutcome::AlreadyAnnotated);
    }

    content.insert_str(position, &format!("{block}\n"));
    Ok(RecordOutcome::Applied)
}

fn compile(record: &HandlerRecord, pattern: &str) -> Result<Regex, RecordError> {
    Regex::new(pattern).map_err(|e| RecordError::PatternFailed {
        function_name: record.function_name().to_string(),
        reason: e.to_string(),
    })
}

/// Whether the attribute run ending right before `position` contains an
/// annotation block.
///
/// Walks upward one attribute at a time (`#[...]`, possibly spanning several
/// lines) and stops at the first line that cannot belong to an attribute.
#[must_use]
pub fn preceded_by_annotation(content: &str, position: usize) -> bool {
    let mut position = position;

    loop {
        let before = content[..position].trim_end();
        if !before.ends_with(']') {
            return false;
        }
        let Some(start) = last_attribute_start(before) else {
            return false;
        };
        if before[start..].trim_start().starts_with(ANNOTATION_MARKER) {
            return true;
        }
        position = start;
    }
}

/// Byte offset of the line opening the attribute that ends `before`.
fn last_attribute_start(before: &str) -> Option<usize> {
    let mut end = before.len();

    loop {
        let line_start = before[..end].rfind('\n').map_or(0, |i| i + 1);
        let line = before[line_start..end].trim();

        if line.starts_with("#[") {
            return Some(line_start);
        }
        if line_start == 0 || line.ends_with('{') || line.ends_with('}') || line.ends_with(';') {
            return None;
        }
        end = line_start - 1;
    }
}
