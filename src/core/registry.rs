//! Key → validator lookup used while building and extending a [`Config`].
//!
//! [`Config`]: crate::config::Config

use crate::defaults::*;
use crate::hooks::ScriptCatalog;
use crate::steps::StepCatalog;
use crate::validators;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied validator for a custom key.
pub type CustomValidator = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Wrap a closure as a [`CustomValidator`].
pub fn custom<F>(f: F) -> CustomValidator
where
    F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinValidator {
    Gitignore,
    BoolOrAsk,
    BoolOrAskOrUrl,
    Path,
    PathArray,
    ContentDevOperation,
    Overwrite,
    Verbosity,
    Steps,
    Scripts,
}

#[derive(Clone)]
pub enum Validator {
    Builtin(BuiltinValidator),
    Custom(CustomValidator),
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Validator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Runtime-extensible validator table.
///
/// Also owns the step and script catalogs that `custom-steps` and `scripts`
/// are checked against.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Validator>,
    steps: StepCatalog,
    scripts: ScriptCatalog,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorRegistry {
    /// Registry pre-populated with every built-in key.
    pub fn new() -> Self {
        use BuiltinValidator::*;

        let builtins = [
            (GITIGNORE, Gitignore),
            (ENV_EXAMPLE, BoolOrAskOrUrl),
            (ENV_FILE, Path),
            (REGISTER_THEME_FOLDER, BoolOrAsk),
            (MOVE_CONTENT, BoolOrAsk),
            (CONTENT_DEV_OP, ContentDevOperation),
            (CONTENT_DEV_DIR, Path),
            (DROPINS, PathArray),
            (UNKNOWN_DROPINS, BoolOrAsk),
            (PREVENT_OVERWRITE, Overwrite),
            (VERBOSITY, Verbosity),
            (CUSTOM_STEPS, Steps),
            (SCRIPTS, Scripts),
        ];

        Self {
            validators: builtins
                .into_iter()
                .map(|(key, builtin)| (key.to_string(), Validator::Builtin(builtin)))
                .collect(),
            steps: StepCatalog::default(),
            scripts: ScriptCatalog::default(),
        }
    }

    pub fn with_steps(mut self, steps: StepCatalog) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_scripts(mut self, scripts: ScriptCatalog) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn steps(&self) -> &StepCatalog {
        &self.steps
    }

    pub fn scripts(&self) -> &ScriptCatalog {
        &self.scripts
    }

    pub fn contains(&self, key: &str) -> bool {
        self.validators.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Validator> {
        self.validators.get(key)
    }

    /// Register a validator, replacing any previous one for `key`.
    pub fn register(&mut self, key: impl Into<String>, validator: Validator) {
        self.validators.insert(key.into(), validator);
    }

    /// Validate `raw` for `key`. Keys without a validator pass through unchanged.
    pub fn validate(&self, key: &str, raw: &Value) -> Option<Value> {
        match self.get(key) {
            Some(validator) => self.apply(validator, raw),
            None => Some(raw.clone()),
        }
    }

    pub fn apply(&self, validator: &Validator, raw: &Value) -> Option<Value> {
        match validator {
            Validator::Custom(f) => f(raw),
            Validator::Builtin(builtin) => match builtin {
                BuiltinValidator::Gitignore => validators::validate_gitignore(raw),
                BuiltinValidator::BoolOrAsk => validators::validate_bool_or_ask(raw),
                BuiltinValidator::BoolOrAskOrUrl => validators::validate_bool_or_ask_or_url(raw),
                BuiltinValidator::Path => validators::validate_path(raw),
                BuiltinValidator::PathArray => validators::validate_path_array(raw),
                BuiltinValidator::ContentDevOperation => {
                    validators::validate_content_dev_operation(raw)
                }
                BuiltinValidator::Overwrite => validators::validate_overwrite(raw),
                BuiltinValidator::Verbosity => validators::validate_verbosity(raw),
                BuiltinValidator::Steps => validators::validate_steps(raw, &self.steps),
                BuiltinValidator::Scripts => validators::validate_scripts(raw, &self.scripts),
            },
        }
    }
}
