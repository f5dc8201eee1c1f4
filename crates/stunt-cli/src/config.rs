use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use stunt_core::{MAX_TRICKS, SolveStrategy};
use thiserror::Error;
use tracing::Level;

use crate::input::InputFormat;
use crate::output::OutputFormat;

const DEFAULT_MAX_TRICKS: usize = 16;
const DEFAULT_LOG_PATH: &str = "logs/stunt-plan.jsonl";

/// Root planner configuration, optionally loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PlannerConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub io: IoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PlannerConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: PlannerConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.limits.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SolverConfig {
    #[serde(default)]
    pub strategy: SolveStrategy,
}

/// Input size limits applied before any table is allocated.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_tricks")]
    pub max_tricks: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tricks: DEFAULT_MAX_TRICKS,
        }
    }
}

impl LimitsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_tricks == 0 || self.max_tricks > MAX_TRICKS {
            return Err(ValidationError::InvalidField {
                field: "limits.max_tricks".to_string(),
                message: format!("must be between 1 and {MAX_TRICKS}"),
            });
        }
        Ok(())
    }
}

fn default_max_tricks() -> usize {
    DEFAULT_MAX_TRICKS
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct IoConfig {
    #[serde(default)]
    pub input_format: InputFormat,
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.enable_structured && self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.path".to_string(),
                message: "path must not be empty when structured logging is enabled"
                    .to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
solver:
  strategy: "bottom_up"
limits:
  max_tricks: 12
io:
  input_format: "json"
  output_format: "explain"
logging:
  enable_structured: true
  tracing_level: "debug"
  path: "out/plan.jsonl"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: PlannerConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.solver.strategy, SolveStrategy::BottomUp);
        assert_eq!(cfg.limits.max_tricks, 12);
        assert_eq!(cfg.io.input_format, InputFormat::Json);
        assert_eq!(cfg.io.output_format, OutputFormat::Explain);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(cfg.logging.path, PathBuf::from("out/plan.jsonl"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: PlannerConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg, PlannerConfig::default());
        assert_eq!(cfg.limits.max_tricks, DEFAULT_MAX_TRICKS);
        assert_eq!(cfg.solver.strategy, SolveStrategy::Memoized);
        assert!(!cfg.logging.enable_structured);
    }

    #[test]
    fn rejects_trick_limit_beyond_mask_width() {
        let yaml = BASIC_YAML.replace("max_tricks: 12", &format!("max_tricks: {}", MAX_TRICKS + 1));
        let mut cfg: PlannerConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("limit too large");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "limits.max_tricks"
        ));
    }

    #[test]
    fn rejects_unknown_tracing_level() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"chatty\"");
        let mut cfg: PlannerConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("bad level");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn blank_tracing_level_falls_back_to_info() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"  \"");
        let mut cfg: PlannerConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("normalized");
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let yaml = BASIC_YAML.replace("bottom_up", "greedy");
        assert!(serde_yaml::from_str::<PlannerConfig>(&yaml).is_err());
    }
}
