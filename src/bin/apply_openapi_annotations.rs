// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! OpenAPI Annotation Applier
//!
//! Inserts `#[utoipa::path(...)]` blocks above Actix-web handlers that do not
//! have one yet. Originals are copied to `<file>.bak` before being rewritten.
//!
//! Usage:
//!   cargo run --bin apply_openapi_annotations -- [--dry-run] [--file=NAME] [--no-backup]
//!
//! Exits non-zero when the handlers directory or the `--file` target is
//! missing, or when any file failed to process.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use openapi_annotator::applier::{AnnotationApplier, ApplyOptions, ApplySummary};
use openapi_annotator::config::AnnotatorConfig;
use openapi_annotator::generator::AnnotationGenerator;
use openapi_annotator::logging::init_logging;
use openapi_annotator::parser::{display_name, HandlerParser};
use tracing::{debug, error};

const RULE: &str = "============================================================";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Insert OpenAPI annotations into Actix-web handler files",
    long_about = None
)]
struct Cli {
    /// Show what would be changed without modifying files
    #[arg(long)]
    dry_run: bool,

    /// Only process this handler file (e.g. auth_handlers.rs)
    #[arg(long, value_name = "NAME")]
    file: Option<String>,

    /// Do not create .bak backup files
    #[arg(long)]
    no_backup: bool,

    /// YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory containing the `*_handlers.rs` files
    #[arg(long, value_name = "DIR")]
    handlers_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging("info");
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
    debug!(?config, "Configuration resolved");

    if !config.handlers_dir.is_dir() {
        println!(
            "❌ Handlers directory not found: {}",
            config.handlers_dir.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let options = ApplyOptions {
        dry_run: cli.dry_run,
        create_backup: !cli.no_backup,
        backup_suffix: config.backup_suffix.clone(),
    };

    println!("🚀 OpenAPI Annotation Applier");
    println!("{RULE}");
    println!(
        "Mode: {}",
        if options.dry_run { "DRY RUN" } else { "APPLY CHANGES" }
    );
    println!(
        "Backup: {}",
        if options.create_backup { "Enabled" } else { "Disabled" }
    );
    println!("Target: {}", cli.file.as_deref().unwrap_or("All files"));
    println!("{RULE}\n");

    let parser = HandlerParser::new(config.tags.clone());
    let applier = AnnotationApplier::new(AnnotationGenerator::new(config.policy.clone()), options);

    let summary = match applier.apply_to_all(&parser, &config.handlers_dir, cli.file.as_deref()) {
        Ok(summary) => summary,
        Err(e) => {
            println!("❌ {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    print_summary(&summary);

    if summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }

    println!("\n✅ Done!");
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &ApplySummary) {
    let counts = summary.record_counts();

    println!("\n{RULE}");
    println!("📊 Summary:");
    println!("  ✅ Modified files: {}", summary.modified_count());
    println!("  ❌ Failed files: {}", summary.failed_count());
    println!("  ⚠️  Files without handlers: {}", summary.no_handler_count());
    println!(
        "  Handlers: {} total, {} annotated, {} already annotated, {} not matched",
        counts.total(),
        counts.applied,
        counts.already_annotated,
        counts.not_found
    );

    if summary.has_failures() {
        println!("\n⚠️  Failed files:");
        for failure in &summary.failures {
            println!("  - {}: {}", display_name(&failure.path), failure.error);
        }
    }

    if summary.dry_run {
        println!("\n🔍 This was a DRY RUN. No files were modified.");
        println!("   Run without --dry-run to apply changes.");
    }
}
