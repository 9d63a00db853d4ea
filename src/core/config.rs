//! The validated, append-only setup configuration.

use crate::defaults::{
    builtin_defaults, ASK, CUSTOM_STEPS, DEFAULT_WP_VERSION, MOVE_CONTENT, REGISTER_THEME_FOLDER,
    WP_VERSION,
};
use crate::error::{Error, Result};
use crate::hooks::{self, Script, ScriptFailureMode, ScriptRunResult};
use crate::registry::{CustomValidator, Validator, ValidatorRegistry};
use crate::steps::Step;
use crate::utils::coerce::is_truthy;
use crate::utils::validation::require_non_empty;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Raw, unvalidated key → value input.
pub type RawConfig = Map<String, Value>;

/// Validated configuration consumed by setup steps.
///
/// Entries can be added with [`Config::append_config`] but never changed or
/// removed once present.
#[derive(Debug, Clone)]
pub struct Config {
    values: Map<String, Value>,
    registry: ValidatorRegistry,
}

impl Config {
    /// Validate `raw` against the built-in validators.
    pub fn new(raw: RawConfig) -> Self {
        Self::with_registry(raw, ValidatorRegistry::new())
    }

    /// Validate `raw` against `registry`, which the configuration keeps for
    /// later appends.
    pub fn with_registry(mut raw: RawConfig, registry: ValidatorRegistry) -> Self {
        let wp_version = raw
            .remove(WP_VERSION)
            .filter(is_truthy)
            .unwrap_or_else(|| Value::String(DEFAULT_WP_VERSION.to_string()));

        let mut values = builtin_defaults();
        for (key, value) in raw {
            match registry.validate(&key, &value) {
                Some(validated) => {
                    values.insert(key, validated);
                }
                None => {
                    crate::log_status!("config", "Ignoring invalid value for '{}', using default", key);
                }
            }
        }

        apply_cross_field_rules(&mut values);
        values.insert(WP_VERSION.to_string(), wp_version);

        Self { values, registry }
    }

    /// Add a new key after construction.
    ///
    /// Keys without a registered validator need `validator`, which is then
    /// registered for `name`. A validator already registered for `name` takes
    /// precedence over the supplied one. When validation rejects `value`
    /// nothing is written, but the registration is kept.
    pub fn append_config(
        &mut self,
        name: &str,
        value: Value,
        validator: Option<CustomValidator>,
    ) -> Result<&mut Self> {
        require_non_empty(name, "name", "Configuration key cannot be empty")?;

        if self.values.contains_key(name) {
            return Err(Error::config_duplicate_key(name));
        }

        let validator = match self.registry.get(name) {
            Some(existing) => existing.clone(),
            None => {
                let supplied =
                    Validator::Custom(validator.ok_or_else(|| Error::config_missing_validator(name))?);
                self.registry.register(name, supplied.clone());
                supplied
            }
        };

        if let Some(validated) = self.registry.apply(&validator, &value) {
            self.values.insert(name.to_string(), validated);
        }

        Ok(self)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Look up `key`; absent keys are an error, so check [`Config::has`] first
    /// when the key is optional.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| Error::config_key_not_found(key))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    /// Whether `key` holds the "ask the user" sentinel.
    pub fn is_ask(&self, key: &str) -> bool {
        self.get_str(key) == Some(ASK)
    }

    /// The WordPress version exactly as supplied, rendered as text.
    pub fn wp_version(&self) -> String {
        match self.values.get(WP_VERSION) {
            Some(Value::String(version)) => version.clone(),
            Some(other) => other.to_string(),
            None => DEFAULT_WP_VERSION.to_string(),
        }
    }

    /// Always fails: entries cannot be overwritten. Use [`Config::append_config`].
    pub fn set(&mut self, key: &str, _value: Value) -> Result<()> {
        Err(Error::config_immutable(key, "set"))
    }

    /// Always fails: entries cannot be removed.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        Err(Error::config_immutable(key, "remove"))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Instantiate every configured custom step, keyed by step name.
    pub fn custom_steps(&self) -> Vec<(String, Box<dyn Step>)> {
        let Some(steps) = self
            .values
            .get(CUSTOM_STEPS)
            .and_then(Value::as_object)
        else {
            return Vec::new();
        };

        steps
            .iter()
            .filter_map(|(name, reference)| {
                let step = self.registry.steps().instantiate(reference.as_str()?)?;
                Some((name.clone(), step))
            })
            .collect()
    }

    pub fn resolve_scripts(&self, event: &str) -> Vec<(String, Script)> {
        hooks::resolve_scripts(self, self.registry.scripts(), event)
    }

    pub fn run_scripts(
        &self,
        event: &str,
        failure_mode: ScriptFailureMode,
    ) -> Result<ScriptRunResult> {
        hooks::run_scripts(self, self.registry.scripts(), event, failure_mode)
    }

    /// Serialize the validated values to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.values)
            .map_err(|e| Error::internal_json(e.to_string(), Some("serialize config".to_string())))
    }
}

/// Registering a theme folder keeps content in place.
fn apply_cross_field_rules(values: &mut Map<String, Value>) {
    let registers_themes = values
        .get(REGISTER_THEME_FOLDER)
        .map(is_truthy)
        .unwrap_or(false);

    if !registers_themes {
        return;
    }

    if values.get(MOVE_CONTENT).map(is_truthy).unwrap_or(false) {
        crate::log_status!(
            "config",
            "'{}' is disabled because '{}' is enabled",
            MOVE_CONTENT,
            REGISTER_THEME_FOLDER
        );
    }
    values.insert(MOVE_CONTENT.to_string(), Value::Bool(false));
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
