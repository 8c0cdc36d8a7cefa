// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! OpenAPI Annotation Report Generator
//!
//! Scans the Actix-web handler files and writes three artifacts:
//! - `openapi_handlers_report.md` - every handler grouped by tag
//! - `openapi_sample_annotations.md` - rendered blocks for the first handlers
//! - `openapi_paths_list.txt` - `paths(...)` entries for the OpenAPI doc struct
//!
//! Usage:
//!   cargo run --bin generate_openapi_annotations
//!
//! Run from the backend root, or pass `--handlers-dir` / `--output-dir`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use openapi_annotator::config::AnnotatorConfig;
use openapi_annotator::constants::{PATHS_LIST_FILE_NAME, REPORT_FILE_NAME, SAMPLES_FILE_NAME};
use openapi_annotator::generator::AnnotationGenerator;
use openapi_annotator::handler::HandlerRecord;
use openapi_annotator::logging::init_logging;
use openapi_annotator::parser::{display_name, HandlerParser};
use openapi_annotator::report::{group_by_tag, handlers_report, paths_list, sample_annotations};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate OpenAPI annotation reports from Actix-web handlers",
    long_about = None
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory containing the `*_handlers.rs` files
    #[arg(long, value_name = "DIR")]
    handlers_dir: Option<PathBuf>,

    /// Directory receiving the generated artifacts
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging("warn");
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AnnotatorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.handlers_dir {
        config.handlers_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    debug!(?config, "Configuration resolved");

    let handlers_dir = config.handlers_dir.clone();
    if !handlers_dir.is_dir() {
        println!("❌ Handlers directory not found: {}", handlers_dir.display());
        return Ok(ExitCode::FAILURE);
    }

    println!("🔍 Scanning handlers in: {}\n", handlers_dir.display());

    let parser = HandlerParser::new(config.tags.clone());
    let outcome = parser.scan_directory(&handlers_dir)?;

    for file in &outcome.files {
        println!("✓ Parsed {}: {} handlers", file.file_name(), file.records.len());
    }
    for failure in &outcome.failures {
        println!("✗ Skipped {}: {failure}", display_name(failure.path()));
    }

    let records: Vec<HandlerRecord> = outcome.records().cloned().collect();
    let generator = AnnotationGenerator::new(config.policy.clone());

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let report_file = write_artifact(
        &config.output_dir,
        REPORT_FILE_NAME,
        &handlers_report(&records),
    )?;
    println!("\n✓ Report saved to: {}", report_file.display());

    let samples_file = write_artifact(
        &config.output_dir,
        SAMPLES_FILE_NAME,
        &sample_annotations(&generator, &records, config.sample_limit),
    )?;
    println!("✓ Sample annotations saved to: {}", samples_file.display());

    let paths_file = write_artifact(
        &config.output_dir,
        PATHS_LIST_FILE_NAME,
        &paths_list(&records),
    )?;
    println!("✓ Paths list saved to: {}", paths_file.display());

    let tag_count = group_by_tag(&records).len();
    println!(
        "\n✅ Found {} handlers across {tag_count} tags",
        records.len()
    );
    println!("\nNext steps:");
    println!("  1. Review {SAMPLES_FILE_NAME}");
    println!("  2. Apply annotations with: cargo run --bin apply_openapi_annotations -- --dry-run");
    println!("  3. Add DTOs to the OpenAPI doc schemas section");
    println!(
        "  4. Add handler functions to the OpenAPI doc paths section ({PATHS_LIST_FILE_NAME})"
    );

    Ok(ExitCode::SUCCESS)
}

fn write_artifact(output_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
