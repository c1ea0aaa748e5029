use thiserror::Error;

/// Errors raised while loading or validating a [`crate::config::RemoteConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors on the edges of the core: JSON decoding, configuration and scenario lookup.
///
/// Match-state transitions themselves never fail.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown tutorial scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid tutorial scenario: {0}")]
    InvalidScenario(String),
}

impl CoreError {
    /// Whether the caller can fix the input and retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Config(ConfigError::Io { .. }) => true,
            CoreError::Config(_) => false,
            CoreError::Json(_) => true,
            CoreError::UnknownScenario(_) => true,
            CoreError::InvalidScenario(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
