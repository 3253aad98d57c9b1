//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the reconciliation engine. The engine itself never reads environment variables or
//! files; callers (such as the `encounter` CLI) resolve a [`CoreConfig`] up front.

use crate::constants::{DEFAULT_CONTENT_DEPTH, MAX_CONTENT_DEPTH};
use crate::content::ContentPredicate;
use crate::{ReconcileError, ReconcileResult};
use serde::Deserialize;
use std::path::Path;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    content_depth: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::InvalidInput`] if `content_depth` is zero or exceeds
    /// [`MAX_CONTENT_DEPTH`].
    pub fn new(content_depth: usize) -> ReconcileResult<Self> {
        validate_content_depth(content_depth)?;
        Ok(Self { content_depth })
    }

    /// Number of nested object levels the content-presence predicate inspects.
    pub fn content_depth(&self) -> usize {
        self.content_depth
    }

    /// Content-presence predicate configured for this engine.
    pub fn content_predicate(&self) -> ContentPredicate {
        ContentPredicate::new(self.content_depth)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            content_depth: DEFAULT_CONTENT_DEPTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileWire {
    #[serde(default)]
    content_depth: Option<usize>,
}

/// Load a [`CoreConfig`] from a YAML file.
///
/// Missing keys fall back to their defaults. An empty file yields the default configuration.
pub fn load_config(path: &Path) -> ReconcileResult<CoreConfig> {
    let contents = std::fs::read_to_string(path).map_err(ReconcileError::ConfigRead)?;
    parse_config_yaml(&contents)
}

/// Parse a [`CoreConfig`] from YAML text.
pub fn parse_config_yaml(contents: &str) -> ReconcileResult<CoreConfig> {
    let wire = if contents.trim().is_empty() {
        ConfigFileWire::default()
    } else {
        serde_yaml::from_str::<ConfigFileWire>(contents)
            .map_err(ReconcileError::YamlDeserialization)?
    };

    CoreConfig::new(wire.content_depth.unwrap_or(DEFAULT_CONTENT_DEPTH))
}

/// Parse the content depth from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `Ok(None)` so the caller can fall through to
/// the next configuration source.
pub fn content_depth_from_env_value(value: Option<String>) -> ReconcileResult<Option<usize>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(None);
    };

    let depth = value.parse::<usize>().map_err(|_| {
        ReconcileError::InvalidInput(format!(
            "content depth must be a positive integer, got: '{}'",
            value
        ))
    })?;
    validate_content_depth(depth)?;

    Ok(Some(depth))
}

fn validate_content_depth(depth: usize) -> ReconcileResult<()> {
    if depth == 0 || depth > MAX_CONTENT_DEPTH {
        return Err(ReconcileError::InvalidInput(format!(
            "content depth must be between 1 and {}, got: {}",
            MAX_CONTENT_DEPTH, depth
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_single_level_recursion() {
        assert_eq!(CoreConfig::default().content_depth(), 1);
    }

    #[test]
    fn test_new_rejects_zero_depth() {
        let err = CoreConfig::new(0).expect_err("zero depth should be rejected");
        assert!(matches!(err, ReconcileError::InvalidInput(msg) if msg.contains("between 1")));
    }

    #[test]
    fn test_new_rejects_depth_above_maximum() {
        assert!(CoreConfig::new(MAX_CONTENT_DEPTH + 1).is_err());
        assert!(CoreConfig::new(MAX_CONTENT_DEPTH).is_ok());
    }

    #[test]
    fn test_load_config_reads_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "content_depth: 3").expect("write config");

        let config = load_config(file.path()).expect("load config");
        assert_eq!(config.content_depth(), 3);
    }

    #[test]
    fn test_load_config_empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");

        let config = load_config(file.path()).expect("load config");
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn test_load_config_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_config(&dir.path().join("missing.yaml")).expect_err("missing file");
        assert!(matches!(err, ReconcileError::ConfigRead(_)));
    }

    #[test]
    fn test_parse_config_yaml_rejects_unknown_keys() {
        let err = parse_config_yaml("content_dpeth: 2\n").expect_err("typo should be rejected");
        assert!(matches!(err, ReconcileError::YamlDeserialization(_)));
    }

    #[test]
    fn test_parse_config_yaml_validates_depth() {
        assert!(parse_config_yaml("content_depth: 0\n").is_err());
    }

    #[test]
    fn test_content_depth_from_env_value_blank_is_absent() {
        assert_eq!(content_depth_from_env_value(None).expect("none"), None);
        assert_eq!(
            content_depth_from_env_value(Some("   ".into())).expect("blank"),
            None
        );
    }

    #[test]
    fn test_content_depth_from_env_value_parses_and_validates() {
        assert_eq!(
            content_depth_from_env_value(Some(" 2 ".into())).expect("two"),
            Some(2)
        );

        let err = content_depth_from_env_value(Some("deep".into())).expect_err("not a number");
        assert!(matches!(err, ReconcileError::InvalidInput(msg) if msg.contains("positive integer")));

        assert!(content_depth_from_env_value(Some("0".into())).is_err());
    }
}
