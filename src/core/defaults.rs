use serde_json::{json, Map, Value};

pub const GITIGNORE: &str = "gitignore";
pub const ENV_EXAMPLE: &str = "env-example";
pub const ENV_FILE: &str = "env-file";
pub const REGISTER_THEME_FOLDER: &str = "register-theme-folder";
pub const MOVE_CONTENT: &str = "move-content";
pub const CONTENT_DEV_OP: &str = "content-dev-op";
pub const CONTENT_DEV_DIR: &str = "content-dev-dir";
pub const DROPINS: &str = "dropins";
pub const UNKNOWN_DROPINS: &str = "unknown-dropins";
pub const PREVENT_OVERWRITE: &str = "prevent-overwrite";
pub const VERBOSITY: &str = "verbosity";
pub const CUSTOM_STEPS: &str = "custom-steps";
pub const SCRIPTS: &str = "scripts";

/// Exempt from validation and always present in a built configuration.
pub const WP_VERSION: &str = "wp-version";
pub const DEFAULT_WP_VERSION: &str = "0.0.0";

/// Sentinel meaning "prompt the user at setup time".
pub const ASK: &str = "ask";

// =============================================================================
// Default value table
// =============================================================================

/// Get built-in defaults, the baseline validated input is merged onto.
pub fn builtin_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert(GITIGNORE.to_string(), json!(true));
    defaults.insert(ENV_EXAMPLE.to_string(), json!(true));
    defaults.insert(ENV_FILE.to_string(), json!(".env"));
    defaults.insert(REGISTER_THEME_FOLDER.to_string(), json!(true));
    defaults.insert(MOVE_CONTENT.to_string(), json!(false));
    defaults.insert(CONTENT_DEV_OP.to_string(), json!("symlink"));
    defaults.insert(CONTENT_DEV_DIR.to_string(), json!("content-dev"));
    defaults.insert(DROPINS.to_string(), json!([]));
    defaults.insert(UNKNOWN_DROPINS.to_string(), json!(ASK));
    defaults.insert(PREVENT_OVERWRITE.to_string(), json!([]));
    defaults.insert(VERBOSITY.to_string(), json!(2));
    defaults.insert(CUSTOM_STEPS.to_string(), json!({}));
    defaults.insert(SCRIPTS.to_string(), json!({}));
    defaults
}
