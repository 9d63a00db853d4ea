//! Named scripts bound to setup lifecycle events.
//!
//! Scripts are in-process callbacks registered by name in a [`ScriptCatalog`].
//! The `scripts` configuration key maps events to script names.
//!
//! Event naming convention: `pre-<step>` / `post-<step>`
//! Examples: `pre-dropins`, `post-env-example`

use crate::config::Config;
use crate::defaults::SCRIPTS;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const PRE_PREFIX: &str = "pre-";
pub const POST_PREFIX: &str = "post-";

/// Callback invoked with the configuration and the event name.
pub type Script = Arc<dyn Fn(&Config, &str) -> Result<()> + Send + Sync>;

/// Whether an event name follows the `pre-`/`post-` convention.
pub fn is_script_event(event: &str) -> bool {
    event.starts_with(PRE_PREFIX) || event.starts_with(POST_PREFIX)
}

#[derive(Default, Clone)]
pub struct ScriptCatalog {
    scripts: BTreeMap<String, Script>,
}

impl ScriptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, script: F) -> &mut Self
    where
        F: Fn(&Config, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.scripts.insert(name.into(), Arc::new(script));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, script: F) -> Self
    where
        F: Fn(&Config, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.register(name, script);
        self
    }

    /// Whether `name` refers to a registered script.
    pub fn is_invocable(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Script> {
        self.scripts.get(name).cloned()
    }
}

impl fmt::Debug for ScriptCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.scripts.keys()).finish()
    }
}

/// Result of running a single script.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptResult {
    pub script: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of running all scripts for an event.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRunResult {
    pub event: String,
    pub scripts: Vec<ScriptResult>,
    pub all_succeeded: bool,
}

/// Whether script failures abort the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFailureMode {
    /// A failing script stops remaining scripts and returns an error.
    Fatal,
    /// Failures are recorded but execution continues.
    NonFatal,
}

/// Script names configured for `event`, in declaration order.
pub fn configured_scripts(config: &Config, event: &str) -> Vec<String> {
    config
        .get(SCRIPTS)
        .ok()
        .and_then(|scripts| scripts.get(event))
        .and_then(|names| names.as_array())
        .map(|names| {
            names
                .iter()
                .filter_map(|name| name.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve configured script names for `event` against the catalog.
pub fn resolve_scripts(
    config: &Config,
    catalog: &ScriptCatalog,
    event: &str,
) -> Vec<(String, Script)> {
    configured_scripts(config, event)
        .into_iter()
        .filter_map(|name| catalog.get(&name).map(|script| (name, script)))
        .collect()
}

/// Run all scripts configured for `event`, sequentially.
pub fn run_scripts(
    config: &Config,
    catalog: &ScriptCatalog,
    event: &str,
    failure_mode: ScriptFailureMode,
) -> Result<ScriptRunResult> {
    let mut results = Vec::new();
    let mut all_succeeded = true;

    for (name, script) in resolve_scripts(config, catalog, event) {
        match script(config, event) {
            Ok(()) => results.push(ScriptResult {
                script: name,
                success: true,
                error: None,
            }),
            Err(err) => {
                if failure_mode == ScriptFailureMode::Fatal {
                    return Err(Error::script_failed(event, name, err.message));
                }
                crate::log_status!("config", "Script '{}' failed during '{}': {}", name, event, err);
                all_succeeded = false;
                results.push(ScriptResult {
                    script: name,
                    success: false,
                    error: Some(err.message),
                });
            }
        }
    }

    Ok(ScriptRunResult {
        event: event.to_string(),
        scripts: results,
        all_succeeded,
    })
}
