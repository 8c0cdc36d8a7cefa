// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for configuration loading and the tag mapping.

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::constants::*;
    use crate::errors::ConfigError;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // ============================================================================
    // TagMapping
    // ============================================================================

    #[test]
    fn test_builtin_tags() {
        let tags = TagMapping::builtin();
        assert_eq!(tags.resolve("auth_handlers"), "Auth");
        assert_eq!(tags.resolve("gdpr_handlers"), "GDPR");
        assert_eq!(tags.resolve("payment_reminder_handlers"), "PaymentRecovery");
        assert_eq!(tags.len(), 29);
    }

    #[test]
    fn test_fallback_title_cases_stem() {
        let tags = TagMapping::builtin();
        assert_eq!(tags.resolve("invoice_handlers"), "Invoice");
        assert_eq!(tags.resolve("call_for_funds_handlers"), "Call_For_Funds");
        assert_eq!(tags.resolve("misc"), "Misc");
    }

    #[test]
    fn test_overrides_extend_and_replace() {
        let mut overrides = BTreeMap::new();
        overrides.insert("auth_handlers".to_string(), "Authentication".to_string());
        overrides.insert("invoice_handlers".to_string(), "Invoices".to_string());

        let base = TagMapping::builtin();
        let tags = base.with_overrides(&overrides);

        assert_eq!(tags.resolve("auth_handlers"), "Authentication");
        assert_eq!(tags.resolve("invoice_handlers"), "Invoices");
        assert_eq!(tags.resolve("building_handlers"), "Buildings");
        // the original mapping is untouched
        assert_eq!(base.resolve("auth_handlers"), "Auth");
    }

    #[test]
    fn test_empty_mapping() {
        let tags = TagMapping::empty();
        assert!(tags.is_empty());
        assert_eq!(tags.resolve("auth_handlers"), "Auth");
        assert_eq!(tags.resolve("building_handlers"), "Building");
    }

    // ============================================================================
    // AnnotationPolicy
    // ============================================================================

    #[test]
    fn test_policy_defaults() {
        let policy = AnnotationPolicy::default();
        assert_eq!(policy.auth_tag, DEFAULT_AUTH_TAG);
        assert!(policy.is_auth_tag("Auth"));
        assert!(!policy.is_auth_tag("auth"));
        assert!(policy.requires_security("Buildings", "/buildings"));
        assert!(!policy.requires_security("Auth", "/auth/me"));
        assert!(!policy.requires_security("Buildings", "/public/buildings"));
    }

    // ============================================================================
    // AnnotatorConfig
    // ============================================================================

    #[test]
    fn test_config_defaults() {
        let config = AnnotatorConfig::default();
        assert_eq!(config.handlers_dir, PathBuf::from(DEFAULT_HANDLERS_DIR));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.backup_suffix, ".bak");
        assert_eq!(config.sample_limit, 10);
        assert_eq!(config.tags, TagMapping::builtin());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r"
handlersDir: backend/handlers
backupSuffix: .orig
sampleLimit: 3
tags:
  invoice_handlers: Invoices
policy:
  securityScheme: jwt
";
        let config = AnnotatorConfig::from_yaml_str(yaml, Path::new("annotator.yaml")).unwrap();
        assert_eq!(config.handlers_dir, PathBuf::from("backend/handlers"));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.backup_suffix, ".orig");
        assert_eq!(config.sample_limit, 3);
        assert_eq!(config.tags.resolve("invoice_handlers"), "Invoices");
        assert_eq!(config.tags.resolve("auth_handlers"), "Auth");
        assert_eq!(config.policy.security_scheme, "jwt");
        assert_eq!(config.policy.auth_tag, DEFAULT_AUTH_TAG);
    }

    #[test]
    fn test_config_empty_yaml_is_default() {
        let config = AnnotatorConfig::from_yaml_str("\n", Path::new("empty.yaml")).unwrap();
        assert_eq!(config, AnnotatorConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err =
            AnnotatorConfig::from_yaml_str("handlerDir: x\n", Path::new("bad.yaml")).unwrap_err();
        match err {
            ConfigError::Invalid { path, .. } => assert_eq!(path, PathBuf::from("bad.yaml")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_empty_backup_suffix() {
        for yaml in ["backupSuffix: \"\"\n", "backupSuffix: \"  \"\n"] {
            match AnnotatorConfig::from_yaml_str(yaml, Path::new("annotator.yaml")) {
                Err(ConfigError::Invalid { reason, .. }) => {
                    assert!(reason.contains("backupSuffix"), "unexpected reason: {reason}");
                }
                other => panic!("expected Invalid for {yaml:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annotator.yaml");
        fs::write(&path, "outputDir: out\n").unwrap();

        let config = AnnotatorConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = AnnotatorConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(
            AnnotatorConfig::load_or_default(None).unwrap(),
            AnnotatorConfig::default()
        );
    }
}
