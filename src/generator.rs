// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Rendering of `#[utoipa::path(...)]` annotation blocks.
//!
//! Rendering is a pure function of the record and the policy. Rendering the
//! same record twice yields the same bytes.
//!
//! # Example
//!
//! ```rust
//! use openapi_annotator::config::AnnotationPolicy;
//! use openapi_annotator::generator::AnnotationGenerator;
//! use openapi_annotator::handler::{HandlerRecord, HttpMethod};
//!
//! let record = HandlerRecord::new(HttpMethod::Delete, "/owners/{id}", "delete_owner", vec![], "Owners");
//! let block = AnnotationGenerator::new(AnnotationPolicy::default()).render(&record);
//! assert!(block.starts_with("#[utoipa::path(\n    delete,\n"));
//! assert!(block.contains("(status = 204, description = \"Resource deleted successfully\"),"));
//! ```

use crate::config::AnnotationPolicy;
use crate::constants::{
    ANNOTATION_MARKER, STATUS_BAD_REQUEST, STATUS_CREATED, STATUS_FORBIDDEN,
    STATUS_INTERNAL_SERVER_ERROR, STATUS_NOT_FOUND, STATUS_NO_CONTENT, STATUS_OK,
    STATUS_UNAUTHORIZED,
};
use crate::handler::{describe_path_param, HandlerRecord, HttpMethod};

const INDENT: &str = "    ";

/// One entry of the response catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEntry {
    pub status: u16,
    pub description: &'static str,
}

/// Success status and description for a method.
#[must_use]
pub fn success_response(method: HttpMethod) -> ResponseEntry {
    match method {
        HttpMethod::Post => ResponseEntry {
            status: STATUS_CREATED,
            description: "Resource created successfully",
        },
        HttpMethod::Delete => ResponseEntry {
            status: STATUS_NO_CONTENT,
            description: "Resource deleted successfully",
        },
        HttpMethod::Get | HttpMethod::Put | HttpMethod::Patch => ResponseEntry {
            status: STATUS_OK,
            description: "Success",
        },
    }
}

/// Renders annotation blocks under a fixed [`AnnotationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct AnnotationGenerator {
    policy: AnnotationPolicy,
}

impl AnnotationGenerator {
    #[must_use]
    pub fn new(policy: AnnotationPolicy) -> Self {
        Self { policy }
    }

    /// Full response catalog for a record, in emission order.
    ///
    /// 401 and 403 are omitted for the auth tag; everything else is constant.
    #[must_use]
    pub fn responses(&self, record: &HandlerRecord) -> Vec<ResponseEntry> {
        let mut responses = vec![
            success_response(record.method()),
            ResponseEntry {
                status: STATUS_BAD_REQUEST,
                description: "Bad Request",
            },
        ];

        if !self.policy.is_auth_tag(record.tag()) {
            responses.push(ResponseEntry {
                status: STATUS_UNAUTHORIZED,
                description: "Unauthorized",
            });
            responses.push(ResponseEntry {
                status: STATUS_FORBIDDEN,
                description: "Forbidden",
            });
        }

        responses.push(ResponseEntry {
            status: STATUS_NOT_FOUND,
            description: "Not Found",
        });
        responses.push(ResponseEntry {
            status: STATUS_INTERNAL_SERVER_ERROR,
            description: "Internal Server Error",
        });

        responses
    }

    /// Annotation block as individual lines.
    #[must_use]
    pub fn render_lines(&self, record: &HandlerRecord) -> Vec<String> {
        let mut lines = vec![ANNOTATION_MARKER.to_string()];

        lines.push(format!("{INDENT}{},", record.method().attribute()));
        lines.push(format!("{INDENT}path = \"{}\",", record.path()));
        lines.push(format!("{INDENT}tag = \"{}\",", record.tag()));
        lines.push(format!("{INDENT}summary = \"{}\",", record.summary()));

        if let Some(body) = record.request_body_type() {
            lines.push(format!("{INDENT}request_body = {body},"));
        }

        if !record.path_params().is_empty() {
            lines.push(format!("{INDENT}params("));
            for param in record.path_params() {
                lines.push(format!(
                    "{INDENT}{INDENT}(\"{param}\" = String, Path, description = \"{}\"),",
                    describe_path_param(param)
                ));
            }
            lines.push(format!("{INDENT}),"));
        }

        lines.push(format!("{INDENT}responses("));
        for response in self.responses(record) {
            lines.push(format!(
                "{INDENT}{INDENT}(status = {}, description = \"{}\"),",
                response.status, response.description
            ));
        }
        lines.push(format!("{INDENT}),"));

        if self.policy.requires_security(record.tag(), record.path()) {
            lines.push(format!("{INDENT}security("));
            lines.push(format!(
                "{INDENT}{INDENT}(\"{}\" = []),",
                self.policy.security_scheme
            ));
            lines.push(format!("{INDENT}),"));
        }

        lines.push(")]".to_string());
        lines
    }

    /// Annotation block as text, lines joined with `\n`, no trailing newline.
    #[must_use]
    pub fn render(&self, record: &HandlerRecord) -> String {
        self.render_lines(record).join("\n")
    }
}
