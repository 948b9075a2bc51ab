use std::env;
use std::fs;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workflow::chain::ChainPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "spendflow.toml";

const ENV_THRESHOLD: &str = "SPENDFLOW_APPROVAL_THRESHOLD";
const ENV_SESSION_PATH: &str = "SPENDFLOW_SESSION_PATH";
const ENV_LOG_LEVEL: &str = "SPENDFLOW_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "SPENDFLOW_LOG_FORMAT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub workflow: WorkflowConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Amount at or above which a second Admin approval step is appended.
    pub approval_threshold: Decimal,
    pub categories: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where the opaque logged-in-user record is stored between runs.
    pub store_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub approval_threshold: Option<Decimal>,
    pub session_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workflow: WorkflowConfig {
                approval_threshold: ChainPolicy::DEFAULT_THRESHOLD,
                categories: [
                    "Office Supplies",
                    "Meals & Entertainment",
                    "Travel",
                    "Software",
                    "Training",
                    "Other",
                ]
                .into_iter()
                .map(str::to_string)
                .collect(),
            },
            session: SessionConfig { store_path: PathBuf::from(".spendflow-session.json") },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    /// Load configuration in layers: built-in defaults, then the TOML file
    /// if present, then `SPENDFLOW_*` environment variables, then explicit
    /// overrides. Validation runs on the merged result.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let file: FileConfig = toml::from_str(&raw)
                    .map_err(|source| ConfigError::ParseFile { path: path.clone(), source })?;
                config.apply_file(file);
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                if options.require_file {
                    return Err(ConfigError::MissingConfigFile(path));
                }
            }
            Err(source) => return Err(ConfigError::ReadFile { path, source }),
        }

        config.apply_env()?;
        config.apply_overrides(options.overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(workflow) = file.workflow {
            if let Some(threshold) = workflow.approval_threshold {
                self.workflow.approval_threshold = threshold;
            }
            if let Some(categories) = workflow.categories {
                self.workflow.categories = categories;
            }
        }
        if let Some(session) = file.session {
            if let Some(store_path) = session.store_path {
                self.session.store_path = store_path;
            }
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = env::var(ENV_THRESHOLD) {
            self.workflow.approval_threshold =
                value.parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: ENV_THRESHOLD.to_string(),
                    value,
                })?;
        }
        if let Ok(value) = env::var(ENV_SESSION_PATH) {
            self.session.store_path = PathBuf::from(value);
        }
        if let Ok(value) = env::var(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
        if let Ok(value) = env::var(ENV_LOG_FORMAT) {
            self.logging.format = match value.to_ascii_lowercase().as_str() {
                "compact" => LogFormat::Compact,
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: ENV_LOG_FORMAT.to_string(),
                        value,
                    })
                }
            };
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(threshold) = overrides.approval_threshold {
            self.workflow.approval_threshold = threshold;
        }
        if let Some(session_path) = overrides.session_path {
            self.session.store_path = session_path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.workflow.approval_threshold <= Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "workflow.approval_threshold must be positive, got {}",
                self.workflow.approval_threshold
            )));
        }
        if self.workflow.categories.is_empty() {
            return Err(ConfigError::Validation(
                "workflow.categories must list at least one category".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    workflow: Option<FileWorkflow>,
    session: Option<FileSession>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Deserialize)]
struct FileWorkflow {
    approval_threshold: Option<Decimal>,
    categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FileSession {
    store_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}
