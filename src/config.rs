// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration for the annotation tooling.
//!
//! Everything the parser, generator and applier need is passed in explicitly:
//!
//! - [`TagMapping`] - immutable file-stem → tag table handed to the parser
//! - [`AnnotationPolicy`] - which tag and path marker mean "public endpoint"
//! - [`AnnotatorConfig`] - directories, backup suffix and the two above
//!
//! # YAML configuration
//!
//! An optional YAML file can override any default. `tags` entries are merged
//! over the built-in table:
//!
//! ```yaml
//! handlersDir: src/infrastructure/web/handlers
//! outputDir: scripts
//! backupSuffix: .orig
//! sampleLimit: 5
//! tags:
//!   invoice_handlers: Invoices
//! policy:
//!   authTag: Auth
//!   publicPathMarker: public
//!   securityScheme: bearer_auth
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::constants::{
    DEFAULT_AUTH_TAG, DEFAULT_BACKUP_SUFFIX, DEFAULT_HANDLERS_DIR, DEFAULT_OUTPUT_DIR,
    DEFAULT_PUBLIC_PATH_MARKER, DEFAULT_SAMPLE_LIMIT, DEFAULT_SECURITY_SCHEME,
};
use crate::errors::ConfigError;
use crate::handler::title_case;

/// Built-in file stem → tag table.
const BUILTIN_TAGS: &[(&str, &str)] = &[
    ("auth_handlers", "Auth"),
    ("building_handlers", "Buildings"),
    ("unit_handlers", "Units"),
    ("owner_handlers", "Owners"),
    ("expense_handlers", "Expenses"),
    ("meeting_handlers", "Meetings"),
    ("budget_handlers", "Budgets"),
    ("document_handlers", "Documents"),
    ("gdpr_handlers", "GDPR"),
    ("payment_handlers", "Payments"),
    ("payment_method_handlers", "PaymentMethods"),
    ("local_exchange_handlers", "LocalExchanges"),
    ("notification_handlers", "Notifications"),
    ("ticket_handlers", "Tickets"),
    ("resolution_handlers", "Resolutions"),
    ("poll_handlers", "Polls"),
    ("quote_handlers", "Quotes"),
    ("convocation_handlers", "Convocations"),
    ("work_report_handlers", "WorkReports"),
    ("technical_inspection_handlers", "TechnicalInspections"),
    ("gamification_handlers", "Gamification"),
    ("skill_handlers", "Skills"),
    ("notice_handlers", "Notices"),
    ("shared_object_handlers", "SharedObjects"),
    ("resource_booking_handlers", "ResourceBookings"),
    ("two_factor_handlers", "TwoFactorAuth"),
    ("etat_date_handlers", "EtatsDates"),
    ("board_member_handlers", "BoardMembers"),
    ("payment_reminder_handlers", "PaymentRecovery"),
];

/// Immutable mapping from handler file stem to documentation tag.
///
/// # Fallback rule
///
/// A stem without an entry is tagged by removing `_handlers` and title-casing
/// what remains: `invoice_handlers` → `Invoice`, `work_order_handlers` →
/// `Work_Order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMapping {
    entries: BTreeMap<String, String>,
}

impl TagMapping {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_TAGS
                .iter()
                .map(|(stem, tag)| ((*stem).to_string(), (*tag).to_string()))
                .collect(),
        }
    }

    /// A mapping with no entries; every stem uses the fallback rule.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns a new mapping with `overrides` merged over this one.
    #[must_use]
    pub fn with_overrides(&self, overrides: &BTreeMap<String, String>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { entries }
    }

    /// Tag for a file stem such as `building_handlers`.
    #[must_use]
    pub fn resolve(&self, stem: &str) -> String {
        self.entries
            .get(stem)
            .cloned()
            .unwrap_or_else(|| title_case(&stem.replace("_handlers", "")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Rules deciding which endpoints are public.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationPolicy {
    /// Endpoints with this tag get no 401/403 responses and no security block
    pub auth_tag: String,
    /// Endpoints whose path contains this substring get no security block
    pub public_path_marker: String,
    /// Security scheme referenced by the security block
    pub security_scheme: String,
}

impl AnnotationPolicy {
    #[must_use]
    pub fn is_auth_tag(&self, tag: &str) -> bool {
        tag == self.auth_tag
    }

    /// Whether a handler with this tag and path gets a security block.
    #[must_use]
    pub fn requires_security(&self, tag: &str, path: &str) -> bool {
        !self.is_auth_tag(tag) && !path.contains(&self.public_path_marker)
    }
}

impl Default for AnnotationPolicy {
    fn default() -> Self {
        Self {
            auth_tag: DEFAULT_AUTH_TAG.to_string(),
            public_path_marker: DEFAULT_PUBLIC_PATH_MARKER.to_string(),
            security_scheme: DEFAULT_SECURITY_SCHEME.to_string(),
        }
    }
}

/// On-disk shape of the YAML configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    handlers_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    backup_suffix: Option<String>,
    sample_limit: Option<usize>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    policy: Option<AnnotationPolicy>,
}

/// Full configuration shared by both binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorConfig {
    /// Directory scanned for `*_handlers.rs` files
    pub handlers_dir: PathBuf,
    /// Directory receiving the generated artifacts
    pub output_dir: PathBuf,
    /// Suffix appended to a file path to form its backup path
    pub backup_suffix: String,
    /// Number of records rendered into the samples artifact
    pub sample_limit: usize,
    pub tags: TagMapping,
    pub policy: AnnotationPolicy,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            handlers_dir: PathBuf::from(DEFAULT_HANDLERS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            tags: TagMapping::builtin(),
            policy: AnnotationPolicy::default(),
        }
    }
}

impl AnnotatorConfig {
    /// Parse a YAML document and apply it over the defaults.
    ///
    /// `source` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the document does not match the schema
    /// or sets an empty `backupSuffix`.
    pub fn from_yaml_str(yaml: &str, source: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Invalid {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        if file
            .backup_suffix
            .as_deref()
            .is_some_and(|suffix| suffix.trim().is_empty())
        {
            return Err(ConfigError::Invalid {
                path: source.to_path_buf(),
                reason: "backupSuffix must not be empty".to_string(),
            });
        }

        let defaults = Self::default();
        Ok(Self {
            handlers_dir: file.handlers_dir.unwrap_or(defaults.handlers_dir),
            output_dir: file.output_dir.unwrap_or(defaults.output_dir),
            backup_suffix: file.backup_suffix.unwrap_or(defaults.backup_suffix),
            sample_limit: file.sample_limit.unwrap_or(defaults.sample_limit),
            tags: defaults.tags.with_overrides(&file.tags),
            policy: file.policy.unwrap_or(defaults.policy),
        })
    }

    /// Load the YAML configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreadable`] if the file cannot be read and
    /// [`ConfigError::Invalid`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration file");
        let yaml = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml, path)
    }

    /// Load `path` when given, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`AnnotatorConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
