//! Raw configuration from text or manifests already held in memory.

use crate::config::RawConfig;
use crate::error::{Error, Result};
use serde_json::Value;

/// Key under a composer manifest's `extra` section holding setup configuration.
pub const COMPOSER_EXTRA_KEY: &str = "wpstarter";

/// Parse a JSON document whose root is a mapping.
pub fn from_json_str(s: &str) -> Result<RawConfig> {
    let value: Value = serde_json::from_str(s)
        .map_err(|e| Error::validation_invalid_json(e, Some("parse config".to_string())))?;
    into_raw(value)
}

/// Parse a YAML document whose root is a mapping.
pub fn from_yaml_str(s: &str) -> Result<RawConfig> {
    let value: Value = serde_yml::from_str(s)
        .map_err(|e| Error::validation_invalid_yaml(e, Some("parse config".to_string())))?;
    into_raw(value)
}

/// Extract `extra.wpstarter` from a parsed composer manifest.
///
/// Missing sections yield an empty map; a section that is present but not a
/// mapping is an error.
pub fn from_composer_manifest(manifest: &Value) -> Result<RawConfig> {
    match manifest.get("extra").and_then(|extra| extra.get(COMPOSER_EXTRA_KEY)) {
        None | Some(Value::Null) => Ok(RawConfig::new()),
        Some(section) => into_raw(section.clone()),
    }
}

/// Require a mapping at the root.
pub fn into_raw(value: Value) -> Result<RawConfig> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(RawConfig::new()),
        other => Err(Error::validation_invalid_argument(
            "config",
            format!("Configuration root must be a mapping, got {}", type_name(&other)),
            None,
            None,
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn json_mapping_parses() {
        let raw = from_json_str(r#"{"env-file": ".env.local", "verbosity": 1}"#).unwrap();
        assert_eq!(raw["env-file"], ".env.local");
        assert_eq!(raw["verbosity"], 1);
    }

    #[test]
    fn json_syntax_error() {
        let err = from_json_str("{nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidJson);
    }

    #[test]
    fn yaml_mapping_parses() {
        let raw = from_yaml_str("gitignore:\n  wp: false\n  custom:\n    - '*.log'\nverbosity: 0\n").unwrap();
        assert_eq!(raw["gitignore"], json!({"wp": false, "custom": ["*.log"]}));
        assert_eq!(raw["verbosity"], 0);
    }

    #[test]
    fn yaml_non_mapping_root_fails() {
        let err = from_yaml_str("- a\n- b\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn composer_extra_section() {
        let manifest = json!({
            "name": "acme/site",
            "extra": {"wpstarter": {"env-file": ".env.prod"}}
        });
        let raw = from_composer_manifest(&manifest).unwrap();
        assert_eq!(raw["env-file"], ".env.prod");

        let raw = from_composer_manifest(&json!({"name": "acme/site"})).unwrap();
        assert!(raw.is_empty());

        let err = from_composer_manifest(&json!({"extra": {"wpstarter": "yes"}})).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }
}
