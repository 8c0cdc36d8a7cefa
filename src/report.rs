// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reports projected from the discovered records.
//!
//! All functions here are pure: they take records and return text. Writing
//! the text anywhere is up to the caller.

use std::collections::BTreeMap;

use crate::generator::AnnotationGenerator;
use crate::handler::HandlerRecord;

/// Records grouped by tag. Tags are sorted; records keep their discovery order.
#[must_use]
pub fn group_by_tag<'a, I>(records: I) -> BTreeMap<&'a str, Vec<&'a HandlerRecord>>
where
    I: IntoIterator<Item = &'a HandlerRecord>,
{
    let mut groups: BTreeMap<&str, Vec<&HandlerRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.tag()).or_default().push(record);
    }
    groups
}

/// Human-readable markdown report: every handler's method, path and function, by tag.
#[must_use]
pub fn handlers_report(records: &[HandlerRecord]) -> String {
    let mut lines = vec![
        "# OpenAPI Handlers Report".to_string(),
        format!("\nTotal handlers found: {}", records.len()),
        "\n## By Tag:\n".to_string(),
    ];

    for (tag, handlers) in group_by_tag(records) {
        lines.push(format!("### {tag} ({} endpoints)", handlers.len()));
        for handler in handlers {
            lines.push(format!(
                "- {} {} → {}",
                handler.method(),
                handler.path(),
                handler.function_name()
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// `paths(...)` listing of function names by tag, ready to paste into an
/// `#[openapi(...)]` attribute.
#[must_use]
pub fn paths_list(records: &[HandlerRecord]) -> String {
    let mut lines = vec!["paths(".to_string()];

    for (tag, handlers) in group_by_tag(records) {
        lines.push(format!("    // {tag}"));
        for handler in handlers {
            lines.push(format!("    {},", handler.function_name()));
        }
    }

    lines.push("),".to_string());
    lines.join("\n")
}

/// Markdown with the rendered block for the first `limit` records, each shown
/// above its route attribute and a stub declaration.
#[must_use]
pub fn sample_annotations(
    generator: &AnnotationGenerator,
    records: &[HandlerRecord],
    limit: usize,
) -> String {
    let mut lines = vec!["# Sample Handler Annotations\n".to_string()];

    for (index, record) in records.iter().take(limit).enumerate() {
        lines.push(format!(
            "\n## {}. {} ({} {})",
            index + 1,
            record.function_name(),
            record.method(),
            record.path()
        ));
        lines.push("```rust".to_string());
        lines.push(generator.render(record));
        lines.push(format!(
            "#[{}(\"{}\")]",
            record.method().attribute(),
            record.path()
        ));
        lines.push(format!(
            "pub async fn {}(...) -> impl Responder {{",
            record.function_name()
        ));
        lines.push("    // handler body".to_string());
        lines.push("}".to_string());
        lines.push("```\n".to_string());
    }

    lines.join("\n")
}
