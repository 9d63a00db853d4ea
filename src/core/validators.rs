//! Per-key validators for setup configuration.
//!
//! Every validator maps a raw value to `Some(validated)` or `None`. `None`
//! never aborts anything: the caller keeps the default for that key.

use crate::defaults::ASK;
use crate::hooks::{is_script_event, ScriptCatalog};
use crate::steps::StepCatalog;
use crate::utils::coerce::{normalized_str, parse_bool, parse_int};
use crate::utils::sanitize::{sanitize_path, sanitize_url};
use serde_json::{Map, Value};

const ASK_SPELLINGS: [&str; 5] = ["ask", "prompt", "query", "interrogate", "demand"];

const GITIGNORE_FLAGS: [&str; 4] = ["wp", "wp-content", "vendor", "common"];

const HARD_OVERWRITE: &str = "hard";

/// Exclusive upper bound for `verbosity`.
const MAX_VERBOSITY: i64 = 3;

// ============================================================================
// Shared primitives
// ============================================================================

pub fn validate_bool(value: &Value) -> Option<Value> {
    parse_bool(value).map(Value::Bool)
}

pub fn validate_bool_or_ask(value: &Value) -> Option<Value> {
    if let Some(lower) = normalized_str(value) {
        if ASK_SPELLINGS.contains(&lower.as_str()) {
            return Some(Value::String(ASK.to_string()));
        }
    }
    validate_bool(value)
}

pub fn validate_bool_or_ask_or_url(value: &Value) -> Option<Value> {
    if let Some(b) = parse_bool(value) {
        return Some(Value::Bool(b));
    }
    if let Some(ask) = validate_bool_or_ask(value) {
        return Some(ask);
    }
    validate_url(value)
}

pub fn validate_url(value: &Value) -> Option<Value> {
    value.as_str().and_then(sanitize_url).map(Value::String)
}

pub fn validate_int(value: &Value) -> Option<Value> {
    parse_int(value).map(Value::from)
}

pub fn validate_path(value: &Value) -> Option<Value> {
    value.as_str().and_then(sanitize_path).map(Value::String)
}

/// Sanitize every element as a path, dropping rejects and duplicates.
/// Objects contribute their values.
pub fn validate_path_array(value: &Value) -> Option<Value> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return None,
    };

    let mut paths: Vec<Value> = Vec::new();
    for path in items.into_iter().filter_map(validate_path) {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    Some(Value::Array(paths))
}

// ============================================================================
// Key-specific validators
// ============================================================================

pub fn validate_gitignore(value: &Value) -> Option<Value> {
    let Value::Object(config) = value else {
        return validate_bool_or_ask_or_url(value);
    };

    let custom: Vec<Value> = config
        .get("custom")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter(|e| e.is_string()).cloned().collect())
        .unwrap_or_default();

    let mut gitignore = Map::new();
    for flag in GITIGNORE_FLAGS {
        let enabled = config.get(flag).and_then(parse_bool) != Some(false);
        gitignore.insert(flag.to_string(), Value::Bool(enabled));
    }
    gitignore.insert("custom".to_string(), Value::Array(custom));

    Some(Value::Object(gitignore))
}

/// `symlink`/`copy` or `ask`; an explicit `false` disables the operation.
/// `true` and anything unrecognized fall back to the default operation.
pub fn validate_content_dev_operation(value: &Value) -> Option<Value> {
    if let Some(lower) = normalized_str(value) {
        if lower == "symlink" || lower == "copy" {
            return Some(Value::String(lower));
        }
    }

    match validate_bool_or_ask(value)? {
        Value::Bool(false) => Some(Value::Bool(false)),
        Value::String(ask) => Some(Value::String(ask)),
        _ => None,
    }
}

pub fn validate_overwrite(value: &Value) -> Option<Value> {
    if matches!(value, Value::Array(_) | Value::Object(_)) {
        return validate_path_array(value);
    }
    if normalized_str(value).as_deref() == Some(HARD_OVERWRITE) {
        return Some(Value::String(HARD_OVERWRITE.to_string()));
    }
    validate_bool_or_ask(value)
}

pub fn validate_verbosity(value: &Value) -> Option<Value> {
    parse_int(value)
        .filter(|level| (0..MAX_VERBOSITY).contains(level))
        .map(Value::from)
}

/// Keep step entries whose reference names a registered step type.
pub fn validate_steps(value: &Value, catalog: &StepCatalog) -> Option<Value> {
    let steps = value.as_object()?;

    let valid: Map<String, Value> = steps
        .iter()
        .filter(|(_, reference)| {
            reference
                .as_str()
                .map(|r| catalog.contains(r))
                .unwrap_or(false)
        })
        .map(|(name, reference)| (name.clone(), reference.clone()))
        .collect();

    if valid.is_empty() {
        None
    } else {
        Some(Value::Object(valid))
    }
}

/// Keep `pre-`/`post-` events, each normalized to a list of invocable names.
pub fn validate_scripts(value: &Value, catalog: &ScriptCatalog) -> Option<Value> {
    let events = value.as_object()?;

    let mut all_scripts = Map::new();
    for (event, scripts) in events {
        if !is_script_event(event) {
            continue;
        }

        let candidates: Vec<&Value> = match scripts {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            single => vec![single],
        };

        let invocable: Vec<Value> = candidates
            .into_iter()
            .filter(|s| s.as_str().map(|n| catalog.is_invocable(n)).unwrap_or(false))
            .cloned()
            .collect();

        if !invocable.is_empty() {
            all_scripts.insert(event.clone(), Value::Array(invocable));
        }
    }

    if all_scripts.is_empty() {
        None
    } else {
        Some(Value::Object(all_scripts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Result;
    use crate::steps::Step;
    use serde_json::json;

    #[test]
    fn bool_spellings() {
        for raw in [json!(true), json!(1), json!(1.0), json!("1"), json!("TRUE"), json!("yes"), json!("on")] {
            assert_eq!(validate_bool(&raw), Some(json!(true)), "{}", raw);
        }
        for raw in [json!(false), json!(0), json!(0.0), json!("0"), json!("false"), json!("No"), json!("off")] {
            assert_eq!(validate_bool(&raw), Some(json!(false)), "{}", raw);
        }
        for raw in [json!(null), json!(2), json!(""), json!("enabled"), json!([true])] {
            assert_eq!(validate_bool(&raw), None, "{}", raw);
        }
    }

    #[test]
    fn bool_or_ask_maps_synonyms() {
        for raw in ["ask", "PROMPT", " query ", "Interrogate", "demand"] {
            assert_eq!(validate_bool_or_ask(&json!(raw)), Some(json!("ask")));
        }
        assert_eq!(validate_bool_or_ask(&json!("yes")), Some(json!(true)));
        assert_eq!(validate_bool_or_ask(&json!("maybe")), None);
    }

    #[test]
    fn bool_or_ask_or_url() {
        assert_eq!(validate_bool_or_ask_or_url(&json!("off")), Some(json!(false)));
        assert_eq!(validate_bool_or_ask_or_url(&json!("Demand")), Some(json!("ask")));
        assert_eq!(
            validate_bool_or_ask_or_url(&json!("https://example.com/.env example")),
            Some(json!("https://example.com/.envexample"))
        );
        assert_eq!(validate_bool_or_ask_or_url(&json!(42)), None);
        assert_eq!(validate_bool_or_ask_or_url(&json!(" ")), None);
    }

    #[test]
    fn content_dev_operation() {
        assert_eq!(validate_content_dev_operation(&json!("SYMLINK")), Some(json!("symlink")));
        assert_eq!(validate_content_dev_operation(&json!("COPY")), Some(json!("copy")));
        assert_eq!(validate_content_dev_operation(&json!("ask")), Some(json!("ask")));
        assert_eq!(validate_content_dev_operation(&json!(true)), None);
        assert_eq!(validate_content_dev_operation(&json!(false)), Some(json!(false)));
        assert_eq!(validate_content_dev_operation(&json!("no")), Some(json!(false)));
        assert_eq!(validate_content_dev_operation(&json!("nonsense")), None);
    }

    #[test]
    fn path_sanitizing() {
        assert_eq!(validate_path(&json!("a\\b\\c")), Some(json!("a/b/c")));
        assert_eq!(validate_path(&json!(123)), None);
        assert_eq!(validate_path(&json!("")), None);
    }

    #[test]
    fn path_array_drops_empty_and_duplicates() {
        assert_eq!(validate_path_array(&json!(["a", "", "a", null])), Some(json!(["a"])));
        assert_eq!(
            validate_path_array(&json!({"x": "db.php", "y": "object-cache.php"})),
            Some(json!(["db.php", "object-cache.php"]))
        );
        assert_eq!(validate_path_array(&json!("db.php")), None);
    }

    #[test]
    fn gitignore_mapping() {
        let validated = validate_gitignore(&json!({
            "wp": "no",
            "vendor": "nonsense",
            "custom": ["*.log", 3, null, "build/"],
            "extra": true
        }))
        .unwrap();

        assert_eq!(
            validated,
            json!({
                "wp": false,
                "wp-content": true,
                "vendor": true,
                "common": true,
                "custom": ["*.log", "build/"]
            })
        );
    }

    #[test]
    fn gitignore_non_array_custom_is_empty() {
        let validated = validate_gitignore(&json!({"custom": "*.log"})).unwrap();
        assert_eq!(validated["custom"], json!([]));
        assert_eq!(validated["wp"], json!(true));
    }

    #[test]
    fn gitignore_scalar_delegates() {
        assert_eq!(validate_gitignore(&json!("0")), Some(json!(false)));
        assert_eq!(validate_gitignore(&json!("prompt")), Some(json!("ask")));
    }

    #[test]
    fn overwrite_variants() {
        assert_eq!(validate_overwrite(&json!(" HARD ")), Some(json!("hard")));
        assert_eq!(validate_overwrite(&json!(["wp-config.php", "wp-config.php"])), Some(json!(["wp-config.php"])));
        assert_eq!(validate_overwrite(&json!("ask")), Some(json!("ask")));
        assert_eq!(validate_overwrite(&json!("true")), Some(json!(true)));
        assert_eq!(validate_overwrite(&json!("soft")), None);
        assert_eq!(validate_overwrite(&json!({"a": "wp-config.php"})), Some(json!(["wp-config.php"])));
    }

    #[test]
    fn verbosity_range() {
        assert_eq!(validate_verbosity(&json!(0)), Some(json!(0)));
        assert_eq!(validate_verbosity(&json!("2")), Some(json!(2)));
        assert_eq!(validate_verbosity(&json!(3)), None);
        assert_eq!(validate_verbosity(&json!(-1)), None);
        assert_eq!(validate_verbosity(&json!("loud")), None);
    }

    #[test]
    fn int_primitive() {
        assert_eq!(validate_int(&json!("7")), Some(json!(7)));
        assert_eq!(validate_int(&json!([])), None);
    }

    #[derive(Default)]
    struct Flush;

    impl Step for Flush {
        fn name(&self) -> &str {
            "flush"
        }

        fn run(&mut self, _config: &mut Config) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn steps_keep_registered_references() {
        let catalog = StepCatalog::new().with::<Flush>("Acme\\FlushStep");
        let validated = validate_steps(
            &json!({"flush": "Acme\\FlushStep", "missing": "Acme\\Nope", "bad": 1}),
            &catalog,
        );
        assert_eq!(validated, Some(json!({"flush": "Acme\\FlushStep"})));
    }

    #[test]
    fn steps_empty_result_is_none() {
        let catalog = StepCatalog::new();
        assert_eq!(validate_steps(&json!({"x": "Nope"}), &catalog), None);
        assert_eq!(validate_steps(&json!(["Nope"]), &catalog), None);
    }

    #[test]
    fn scripts_keep_prefixed_events() {
        let catalog = ScriptCatalog::new()
            .with("install_hook", |_, _| Ok(()))
            .with("other_hook", |_, _| Ok(()));

        let validated = validate_scripts(
            &json!({"pre-install": "install_hook", "unrelated": "other_hook"}),
            &catalog,
        );
        assert_eq!(validated, Some(json!({"pre-install": ["install_hook"]})));
    }

    #[test]
    fn scripts_filter_non_invocables() {
        let catalog = ScriptCatalog::new().with("a", |_, _| Ok(()));

        let validated = validate_scripts(
            &json!({"post-dropins": ["a", "missing", 5], "pre-env": ["missing"]}),
            &catalog,
        );
        assert_eq!(validated, Some(json!({"post-dropins": ["a"]})));
        assert_eq!(validate_scripts(&json!({"pre-env": "missing"}), &catalog), None);
        assert_eq!(
            validate_scripts(&json!({"pre-x": {"0": "a", "1": "missing"}}), &catalog),
            Some(json!({"pre-x": ["a"]}))
        );
        assert_eq!(validate_scripts(&json!("a"), &catalog), None);
    }
}
