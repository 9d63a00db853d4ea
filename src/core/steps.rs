//! Setup step capability contract and the catalog of step types that
//! `custom-steps` entries may reference.

use crate::config::Config;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;

/// A unit of setup work run against the validated configuration.
///
/// Steps may record derived values with [`Config::append_config`].
pub trait Step {
    fn name(&self) -> &str;

    /// Whether the step should run for this configuration.
    fn allowed(&self, _config: &Config) -> bool {
        true
    }

    fn run(&mut self, config: &mut Config) -> Result<()>;
}

type StepFactory = fn() -> Box<dyn Step>;

fn build<S: Step + Default + 'static>() -> Box<dyn Step> {
    Box::new(S::default())
}

/// Step types addressable by reference string.
///
/// Registration is the conformance check: only types implementing [`Step`]
/// and constructible via `Default` can be added.
#[derive(Default, Clone)]
pub struct StepCatalog {
    factories: BTreeMap<String, StepFactory>,
}

impl StepCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Step + Default + 'static>(&mut self, reference: impl Into<String>) -> &mut Self {
        self.factories.insert(reference.into(), build::<S>);
        self
    }

    pub fn with<S: Step + Default + 'static>(mut self, reference: impl Into<String>) -> Self {
        self.register::<S>(reference);
        self
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.factories.contains_key(reference)
    }

    /// Build a fresh instance of the referenced step type.
    pub fn instantiate(&self, reference: &str) -> Option<Box<dyn Step>> {
        self.factories.get(reference).map(|factory| factory())
    }

    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for StepCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
