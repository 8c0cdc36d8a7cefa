// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the annotation tooling.
//!
//! This module contains the default paths, file names and policy values used
//! throughout the codebase. Constants are organized by category for easy maintenance.

// ============================================================================
// Filesystem Layout
// ============================================================================

/// Handlers directory, relative to the backend root
pub const DEFAULT_HANDLERS_DIR: &str = "src/infrastructure/web/handlers";

/// Directory receiving the generated artifacts, relative to the backend root
pub const DEFAULT_OUTPUT_DIR: &str = "scripts";

/// File name suffix that marks a handler source file
pub const HANDLER_FILE_SUFFIX: &str = "_handlers.rs";

/// Module aggregator file, never scanned
pub const MODULE_FILE_NAME: &str = "mod.rs";

/// Suffix appended to a handler file path to form its backup path
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

// ============================================================================
// Generated Artifacts
// ============================================================================

/// Grouped-by-tag handler report
pub const REPORT_FILE_NAME: &str = "openapi_handlers_report.md";

/// Rendered annotation samples
pub const SAMPLES_FILE_NAME: &str = "openapi_sample_annotations.md";

/// `paths(...)` listing for the OpenAPI doc struct
pub const PATHS_LIST_FILE_NAME: &str = "openapi_paths_list.txt";

/// Number of handlers included in the samples artifact
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

// ============================================================================
// Annotation Policy
// ============================================================================

/// Tag whose endpoints are public (no 401/403, no security block)
pub const DEFAULT_AUTH_TAG: &str = "Auth";

/// Path substring marking a public endpoint (no security block)
pub const DEFAULT_PUBLIC_PATH_MARKER: &str = "public";

/// Name of the security scheme referenced by the security block
pub const DEFAULT_SECURITY_SCHEME: &str = "bearer_auth";

/// Opening of every annotation block
pub const ANNOTATION_MARKER: &str = "#[utoipa::path(";

// ============================================================================
// Handler Source Patterns
// ============================================================================

/// Wrapper type marking a JSON request body parameter
pub const JSON_BODY_WRAPPER: &str = "web::Json<";

/// Wrapper type marking a query-string parameter
pub const QUERY_WRAPPER: &str = "web::Query<";

// ============================================================================
// Response Catalog
// ============================================================================

/// Success status for `POST` handlers
pub const STATUS_CREATED: u16 = 201;

/// Success status for `DELETE` handlers
pub const STATUS_NO_CONTENT: u16 = 204;

/// Success status for every other method
pub const STATUS_OK: u16 = 200;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;
