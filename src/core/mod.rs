// Public modules
pub mod config;
pub mod defaults;
pub mod error;
pub mod hooks;
pub mod input;
pub mod registry;
pub mod steps;
pub mod validators;

// Re-export common types for convenience
pub use config::{Config, RawConfig};
pub use error::{Error, ErrorCode, Result};
pub use hooks::{Script, ScriptCatalog, ScriptFailureMode, ScriptRunResult};
pub use registry::{custom, BuiltinValidator, CustomValidator, Validator, ValidatorRegistry};
pub use steps::{Step, StepCatalog};
