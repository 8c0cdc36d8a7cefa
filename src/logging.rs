// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format (`text` or `json`)
pub const LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";

/// Install the global `tracing` subscriber.
///
/// Format: timestamp file:line LEVEL message
///
/// Respects `RUST_LOG` if set, otherwise `default_level` is used.
/// Example: `RUST_LOG=debug apply_openapi_annotations --dry-run`
///
/// Respects `RUST_LOG_FORMAT` for the output format.
/// Example: `RUST_LOG_FORMAT=json generate_openapi_annotations`
///
/// Logs go to stderr; stdout is reserved for the reports the binaries print.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());

    let result = match log_format.to_lowercase().as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .compact()
            .try_init(),
    };

    // An earlier subscriber (e.g. from a test harness) stays in place
    if let Err(e) = result {
        tracing::debug!(error = %e, "Global subscriber already installed");
    }
}
