// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Handler records: one discovered HTTP operation each.
//!
//! A [`HandlerRecord`] is built fresh on every scan and never mutated. The only
//! thing the tooling ever rewrites is the handler source text, never a record.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{JSON_BODY_WRAPPER, QUERY_WRAPPER};
use crate::errors::RecordError;

/// HTTP methods recognized on Actix-web route attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// All recognized methods, in attribute-pattern order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Upper-case method name (e.g. `GET`), as shown in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Lower-case attribute name (e.g. `get` in `#[get("/x")]`).
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RecordError;

    /// Parses an attribute name; only the lower-case Actix spelling is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.attribute() == s)
            .ok_or_else(|| RecordError::UnknownMethod {
                method: s.to_string(),
            })
    }
}

/// One discovered handler function.
///
/// Construct with [`HandlerRecord::new`]; derived fields (summary, description,
/// path parameters) are computed there and cannot drift from their sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRecord {
    method: HttpMethod,
    path: String,
    function_name: String,
    parameters: Vec<String>,
    tag: String,
    summary: String,
    description: String,
    request_body_type: Option<String>,
    path_params: Vec<String>,
    query_params: Vec<String>,
}

impl HandlerRecord {
    /// Build a record from the pieces the parser extracted.
    ///
    /// # Arguments
    ///
    /// * `method` - Route attribute method
    /// * `path` - Route template, e.g. `/buildings/{id}`
    /// * `function_name` - Handler identifier
    /// * `parameters` - Raw parameter declarations in source order
    /// * `tag` - Grouping label resolved from the file name
    #[must_use]
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        function_name: impl Into<String>,
        parameters: Vec<String>,
        tag: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let function_name = function_name.into();
        let summary = summary_from_function_name(&function_name);
        let description = format!("{summary} endpoint");
        let path_params = extract_path_params(&path);
        let request_body_type = detect_request_body(&parameters);
        let query_params = detect_query_params(&parameters);

        Self {
            method,
            path,
            function_name,
            parameters,
            tag: tag.into(),
            summary,
            description,
            request_body_type,
            path_params,
            query_params,
        }
    }

    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn request_body_type(&self) -> Option<&str> {
        self.request_body_type.as_deref()
    }

    #[must_use]
    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    #[must_use]
    pub fn query_params(&self) -> &[String] {
        &self.query_params
    }
}

/// `{name}` placeholder in a route template.
static PATH_PARAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("path param pattern is a valid regex"));

/// `web::Json<Ident>` in a parameter declaration.
static JSON_BODY_PATTERN: LazyLock<Regex> = LazyLock::new(|| wrapper_pattern(JSON_BODY_WRAPPER));

/// `web::Query<Ident>` in a parameter declaration.
static QUERY_PATTERN: LazyLock<Regex> = LazyLock::new(|| wrapper_pattern(QUERY_WRAPPER));

/// `<wrapper>Ident>`; nested generics such as `web::Json<Vec<Dto>>` do not match.
fn wrapper_pattern(wrapper: &str) -> Regex {
    Regex::new(&format!(r"{}(\w+)>", regex::escape(wrapper)))
        .expect("wrapper pattern is a valid regex")
}

/// Extract `{name}` placeholders from a route template, in order of first
/// appearance. A name repeated in the template is returned once.
///
/// Only word characters are accepted inside the braces; anything else
/// (e.g. `{id:\d+}`) is not a placeholder.
///
/// # Example
///
/// ```rust
/// use openapi_annotator::handler::extract_path_params;
///
/// let params = extract_path_params("/buildings/{building_id}/units/{id}");
/// assert_eq!(params, vec!["building_id", "id"]);
/// ```
#[must_use]
pub fn extract_path_params(path: &str) -> Vec<String> {
    let mut params: Vec<String> = Vec::new();
    for caps in PATH_PARAM_PATTERN.captures_iter(path) {
        let name = &caps[1];
        if !params.iter().any(|p| p == name) {
            params.push(name.to_string());
        }
    }
    params
}

/// Type name of the first parameter wrapped in `web::Json<..>`, if any.
#[must_use]
pub fn detect_request_body(parameters: &[String]) -> Option<String> {
    parameters.iter().find_map(|param| {
        JSON_BODY_PATTERN
            .captures(param)
            .map(|caps| caps[1].to_string())
    })
}

/// Type names of every parameter wrapped in `web::Query<..>`, in order.
#[must_use]
pub fn detect_query_params(parameters: &[String]) -> Vec<String> {
    parameters
        .iter()
        .filter_map(|param| QUERY_PATTERN.captures(param))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// `snake_case` function name to a Title Case summary (`get_building` → `Get Building`).
#[must_use]
pub fn summary_from_function_name(function_name: &str) -> String {
    function_name
        .replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human description for a path parameter (`building_id` → `Building Id`).
#[must_use]
pub fn describe_path_param(name: &str) -> String {
    title_case(&name.replace('_', " "))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title-case every alphabetic run: the first letter after a non-letter is
/// upper-cased, the others lower-cased (`payment_method` → `Payment_Method`).
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}
