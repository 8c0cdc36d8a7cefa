// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # OpenAPI Annotator - utoipa annotations for Actix-web handlers
//!
//! Keeps `#[utoipa::path(...)]` annotation blocks in sync with the Actix-web
//! handler functions of a backend.
//!
//! ## Overview
//!
//! The pipeline is strictly one-way:
//!
//! ```text
//! parser ──records──▶ generator ──blocks──▶ applier ──▶ handler files (+ .bak)
//!    └──────records──────────────────────▶ report  ──▶ markdown / paths list
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - Handler file discovery and record extraction
//! - [`handler`] - [`handler::HandlerRecord`] and the name/path helpers
//! - [`generator`] - Pure rendering of annotation blocks
//! - [`applier`] - Insertion into source text, backups, dry runs
//! - [`report`] - Grouped-by-tag report, samples and `paths(...)` list
//! - [`config`] - Tag mapping, policy and YAML configuration
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```rust
//! use openapi_annotator::config::{AnnotationPolicy, TagMapping};
//! use openapi_annotator::generator::AnnotationGenerator;
//! use openapi_annotator::parser::HandlerParser;
//! use std::path::Path;
//!
//! let source = r#"
//! #[get("/buildings/{id}")]
//! pub async fn get_building(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
//!     HttpResponse::Ok().finish()
//! }
//! "#;
//!
//! let parser = HandlerParser::new(TagMapping::builtin());
//! let parsed = parser.parse_text(Path::new("building_handlers.rs"), source);
//! assert_eq!(parsed.tag, "Buildings");
//!
//! let block = AnnotationGenerator::new(AnnotationPolicy::default()).render(&parsed.records[0]);
//! assert!(block.contains("path = \"/buildings/{id}\","));
//! ```

pub mod applier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod handler;
pub mod logging;
pub mod parser;
pub mod report;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;
#[cfg(test)]
mod generator_tests;
