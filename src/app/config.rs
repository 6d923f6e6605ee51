//! # Configuration Module
//!
//! Typed configuration for the movie catalog application.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Command line arguments
//! 2. Environment variables
//! 3. JSON configuration file
//! 4. Default values
//!
//! ## Example JSON Structure
//!
//! ```json
//! {
//!   "catalog": {
//!     "dispatch_policy": "isolate",
//!     "observers": ["email_notifier", "logger_service", "recommender"]
//!   },
//!   "email_notifier": { "recipient": "subscribers@catalog.example" },
//!   "recommender": { "max_recommendations": 5 },
//!   "logging": { "filter": "movie_catalog=info,catalog_core=info" }
//! }
//! ```

use std::fmt;

use catalog_core::core::bits::DispatchPolicy;
use clap::ValueEnum;
use derive_builder::UninitializedFieldError;
use eyre::Report;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All configuration operations return `Result<T, ConfigBuildError>`
#[derive(Debug, Error)]
pub enum ConfigBuildError {
    /// A required configuration field is missing or uninitialized
    #[error("Configuration missing or invalid `{0}`")]
    UninitializedField(&'static str),
    /// General configuration error with context
    #[error("Configuration error `{0}`")]
    Other(String),
    /// File system or parsing error when loading configuration files
    #[error("Configuration file error: {0}")]
    FileError(String),
    /// Configuration validation error with specific validation failure details
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

impl From<UninitializedFieldError> for ConfigBuildError {
    fn from(err: UninitializedFieldError) -> Self {
        ConfigBuildError::UninitializedField(err.field_name())
    }
}

impl From<Report> for ConfigBuildError {
    fn from(report: Report) -> Self {
        ConfigBuildError::Other(format!("{:?}", report))
    }
}

impl From<std::io::Error> for ConfigBuildError {
    fn from(err: std::io::Error) -> Self {
        ConfigBuildError::FileError(format!("IO error: {:?}", err))
    }
}

impl From<serde_json::Error> for ConfigBuildError {
    fn from(err: serde_json::Error) -> Self {
        ConfigBuildError::FileError(format!("JSON parsing error: {}", err))
    }
}

/// Observers the application knows how to build
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ObserverKind {
    EmailNotifier,
    LoggerService,
    Recommender,
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailNotifier => f.write_str("EmailNotifier"),
            Self::LoggerService => f.write_str("LoggerService"),
            Self::Recommender => f.write_str("Recommender"),
        }
    }
}

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub catalog: CatalogSettings,
    pub email_notifier: EmailNotifierSettings,
    pub recommender: RecommenderSettings,
    pub logging: LoggingSettings,
}

impl ApplicationConfig {
    /// Apply CLI overrides to configuration, field by field
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(policy) = cli.dispatch_policy {
            self.catalog.dispatch_policy = policy;
        }
        if let Some(log_path) = &cli.log_path {
            self.logging.log_path = Some(log_path.clone());
        }
        if let Some(recipient) = &cli.email_recipient {
            self.email_notifier.recipient = recipient.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// What happens to the rest of the dispatch when an observer fails
    pub dispatch_policy: DispatchPolicy,
    /// Observers attached at start, in attachment order
    pub observers: Vec<ObserverKind>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            dispatch_policy: DispatchPolicy::Isolate,
            observers: vec![
                ObserverKind::EmailNotifier,
                ObserverKind::LoggerService,
                ObserverKind::Recommender,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailNotifierSettings {
    pub recipient: String,
}

impl Default for EmailNotifierSettings {
    fn default() -> Self {
        Self {
            recipient: String::from("subscribers@catalog.example"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderSettings {
    pub max_recommendations: usize,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            max_recommendations: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Tracing filter directives, RUST_LOG takes precedence
    pub filter: Option<String>,
    /// Directory for rolling log files, terminal only when absent
    pub log_path: Option<String>,
}

/// Values given on the command line that take precedence over everything else
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dispatch_policy: Option<DispatchPolicy>,
    pub log_path: Option<String>,
    pub email_recipient: Option<String>,
}

#[cfg(test)]
mod tests {
    use catalog_core::core::bits::DispatchPolicy;

    use super::{ApplicationConfig, CliOverrides, ObserverKind};

    #[test]
    fn test_parse_partial_config() {
        let config: ApplicationConfig = serde_json::from_str(
            r#"{
                "catalog": { "dispatch_policy": "fail_fast", "observers": ["recommender"] },
                "recommender": { "max_recommendations": 2 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.catalog.dispatch_policy, DispatchPolicy::FailFast);
        assert_eq!(config.catalog.observers, vec![ObserverKind::Recommender]);
        assert_eq!(config.recommender.max_recommendations, 2);
        assert_eq!(config.email_notifier.recipient, "subscribers@catalog.example");
        assert!(config.logging.log_path.is_none());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: ApplicationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ApplicationConfig::default());
        assert_eq!(config.catalog.observers.len(), 3);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = ApplicationConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            dispatch_policy: Some(DispatchPolicy::FailFast),
            log_path: Some(String::from("logs")),
            email_recipient: None,
        });

        assert_eq!(config.catalog.dispatch_policy, DispatchPolicy::FailFast);
        assert_eq!(config.logging.log_path.as_deref(), Some("logs"));
        assert_eq!(config.email_notifier.recipient, "subscribers@catalog.example");
    }
}
