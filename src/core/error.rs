use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigDuplicateKey,
    ConfigMissingValidator,
    ConfigImmutable,
    ConfigKeyNotFound,

    ValidationInvalidArgument,
    ValidationInvalidJson,
    ValidationInvalidYaml,

    ScriptFailed,

    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigDuplicateKey => "config.duplicate_key",
            ErrorCode::ConfigMissingValidator => "config.missing_validator",
            ErrorCode::ConfigImmutable => "config.immutable",
            ErrorCode::ConfigKeyNotFound => "config.key_not_found",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationInvalidJson => "validation.invalid_json",
            ErrorCode::ValidationInvalidYaml => "validation.invalid_yaml",

            ErrorCode::ScriptFailed => "script.failed",

            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigKeyDetails {
    pub key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigImmutableDetails {
    pub key: String,
    pub operation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptFailedDetails {
    pub event: String,
    pub script: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn config_duplicate_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ConfigDuplicateKey,
            format!("Configuration key '{}' is already set", key),
            to_details(ConfigKeyDetails { key }),
        )
        .with_hint("Check has() before calling append_config()")
    }

    pub fn config_missing_validator(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ConfigMissingValidator,
            format!("No validator registered for configuration key '{}'", key),
            to_details(ConfigKeyDetails { key }),
        )
        .with_hint("Pass a validator when appending a custom key for the first time")
    }

    pub fn config_immutable(key: impl Into<String>, operation: impl Into<String>) -> Self {
        let key = key.into();
        let operation = operation.into();
        Self::new(
            ErrorCode::ConfigImmutable,
            format!("Cannot {} configuration key '{}': configuration is read-only", operation, key),
            to_details(ConfigImmutableDetails { key, operation }),
        )
        .with_hint("Use append_config() to add new keys")
    }

    pub fn config_key_not_found(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ConfigKeyNotFound,
            format!("Configuration key '{}' not found", key),
            to_details(ConfigKeyDetails { key }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn validation_invalid_json(err: serde_json::Error, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
        });

        Self::new(ErrorCode::ValidationInvalidJson, "Invalid JSON", details)
    }

    pub fn validation_invalid_yaml(err: serde_yml::Error, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": err.to_string(),
            "context": context,
        });

        Self::new(ErrorCode::ValidationInvalidYaml, "Invalid YAML", details)
    }

    pub fn script_failed(
        event: impl Into<String>,
        script: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let event = event.into();
        let script = script.into();
        Self::new(
            ErrorCode::ScriptFailed,
            format!("Script '{}' failed during '{}'", script, event),
            to_details(ScriptFailedDetails {
                event,
                script,
                error: error.into(),
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
