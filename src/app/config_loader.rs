use std::{
    env, fs,
    path::{Path, PathBuf},
};

use catalog_core::core::bits::DispatchPolicy;

use crate::{
    app::config::{ApplicationConfig, CliOverrides, ConfigBuildError},
    Cli,
};

const ENV_DISPATCH_POLICY: &str = "MOVIE_CATALOG_DISPATCH_POLICY";
const ENV_EMAIL_RECIPIENT: &str = "MOVIE_CATALOG_EMAIL_RECIPIENT";
const ENV_LOG_PATH: &str = "MOVIE_CATALOG_LOG_PATH";

/// Configuration loader that handles loading from files and applying overrides
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    cli_overrides: CliOverrides,
}

impl ConfigLoader {
    /// Used when no path is given and the file exists
    pub const DEFAULT_CONFIG_PATH: &'static str = "configs/config.json";

    pub fn new(cli: &Cli) -> Self {
        Self {
            config_path: cli.config_path.as_ref().map(PathBuf::from),
            cli_overrides: Self::extract_cli_overrides(cli),
        }
    }

    pub fn new_with_overrides(config_path: Option<PathBuf>, cli_overrides: CliOverrides) -> Self {
        Self {
            config_path,
            cli_overrides,
        }
    }

    fn extract_cli_overrides(cli: &Cli) -> CliOverrides {
        CliOverrides {
            dispatch_policy: cli.dispatch_policy,
            log_path: cli.log_path.clone(),
            email_recipient: cli.email_recipient.clone(),
        }
    }

    /// Load the complete application configuration
    pub fn load_config(&self) -> Result<ApplicationConfig, ConfigBuildError> {
        self.load_config_with_env(|key| env::var(key).ok())
    }

    /// Same as [`Self::load_config`], reading environment through `lookup_env`
    pub fn load_config_with_env(
        &self,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Result<ApplicationConfig, ConfigBuildError> {
        let mut config = match &self.config_path {
            Some(path) => Self::load_config_from_file(path)?,
            None if Path::new(Self::DEFAULT_CONFIG_PATH).exists() => {
                Self::load_config_from_file(Path::new(Self::DEFAULT_CONFIG_PATH))?
            }
            None => {
                tracing::debug!("No configuration file, using defaults");
                ApplicationConfig::default()
            }
        };

        Self::merge_environment_variables(&mut config, lookup_env)?;
        config.apply_cli_overrides(&self.cli_overrides);

        Self::validate_config(&config)?;
        Ok(config)
    }

    fn load_config_from_file(path: &Path) -> Result<ApplicationConfig, ConfigBuildError> {
        if !path.exists() {
            return Err(ConfigBuildError::FileError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => {}
            other => {
                return Err(ConfigBuildError::FileError(format!(
                    "Unsupported configuration file format: {:?}. Supported formats: json",
                    other
                )))
            }
        }

        tracing::info!(config_path = %path.display(), "Loading configuration from file");

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|err| {
            ConfigBuildError::FileError(format!(
                "Failed to parse JSON configuration file {}: {}",
                path.display(),
                err
            ))
        })?;

        Ok(config)
    }

    fn merge_environment_variables(
        config: &mut ApplicationConfig,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigBuildError> {
        if let Some(val) = lookup_env(ENV_DISPATCH_POLICY) {
            tracing::debug!(env_var = ENV_DISPATCH_POLICY, value = %val, "Overriding dispatch policy");
            config.catalog.dispatch_policy = val.parse::<DispatchPolicy>().map_err(|err| {
                ConfigBuildError::Other(format!(
                    "Failed to parse {}: {}",
                    ENV_DISPATCH_POLICY, err
                ))
            })?;
        }
        if let Some(val) = lookup_env(ENV_EMAIL_RECIPIENT) {
            config.email_notifier.recipient = val;
        }
        if let Some(val) = lookup_env(ENV_LOG_PATH) {
            config.logging.log_path = Some(val);
        }
        Ok(())
    }

    fn validate_config(config: &ApplicationConfig) -> Result<(), ConfigBuildError> {
        tracing::debug!("Validating application configuration");

        let recipient = config.email_notifier.recipient.trim();
        if recipient.is_empty() || !recipient.contains('@') {
            return Err(ConfigBuildError::ValidationError(format!(
                "email_notifier.recipient must be an e-mail address, got '{}'",
                config.email_notifier.recipient
            )));
        }

        if config.recommender.max_recommendations == 0 {
            return Err(ConfigBuildError::ValidationError(String::from(
                "recommender.max_recommendations must be greater than 0",
            )));
        }

        if let Some(log_path) = &config.logging.log_path {
            if log_path.trim().is_empty() {
                return Err(ConfigBuildError::ValidationError(String::from(
                    "logging.log_path cannot be empty",
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use catalog_core::core::bits::DispatchPolicy;

    use crate::app::config::{CliOverrides, ConfigBuildError, ObserverKind};

    use super::ConfigLoader;

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!(
            "movie-catalog-{}-{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_from_file() {
        let path = write_config(
            "load",
            r#"{
                "catalog": { "observers": ["logger_service", "email_notifier"] },
                "email_notifier": { "recipient": "ops@catalog.example" }
            }"#,
        );

        let config = ConfigLoader::new_with_overrides(Some(path.clone()), CliOverrides::default())
            .load_config_with_env(no_env)
            .unwrap();

        assert_eq!(
            config.catalog.observers,
            vec![ObserverKind::LoggerService, ObserverKind::EmailNotifier]
        );
        assert_eq!(config.email_notifier.recipient, "ops@catalog.example");

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new_with_overrides(
            Some(PathBuf::from("does/not/exist.json")),
            CliOverrides::default(),
        );

        assert!(matches!(
            loader.load_config_with_env(no_env),
            Err(ConfigBuildError::FileError(_))
        ));
    }

    #[test]
    fn test_cli_wins_over_env() {
        let path = write_config("precedence", r#"{ "catalog": { "dispatch_policy": "isolate" } }"#);

        let loader = ConfigLoader::new_with_overrides(
            Some(path.clone()),
            CliOverrides {
                dispatch_policy: Some(DispatchPolicy::Isolate),
                ..Default::default()
            },
        );

        let config = loader
            .load_config_with_env(|key| match key {
                "MOVIE_CATALOG_DISPATCH_POLICY" => Some(String::from("fail_fast")),
                "MOVIE_CATALOG_EMAIL_RECIPIENT" => Some(String::from("env@catalog.example")),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.catalog.dispatch_policy, DispatchPolicy::Isolate);
        assert_eq!(config.email_notifier.recipient, "env@catalog.example");

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_env_policy() {
        let path = write_config("bad-env", "{}");
        let loader = ConfigLoader::new_with_overrides(Some(path.clone()), CliOverrides::default());

        assert!(loader
            .load_config_with_env(|key| (key == "MOVIE_CATALOG_DISPATCH_POLICY")
                .then(|| String::from("retry")))
            .is_err());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_validation_errors() {
        let path = write_config("invalid", r#"{ "recommender": { "max_recommendations": 0 } }"#);
        let loader = ConfigLoader::new_with_overrides(Some(path.clone()), CliOverrides::default());
        assert!(matches!(
            loader.load_config_with_env(no_env),
            Err(ConfigBuildError::ValidationError(_))
        ));

        fs::remove_file(path).unwrap();

        let path = write_config("bad-recipient", "{}");
        let loader = ConfigLoader::new_with_overrides(
            Some(path.clone()),
            CliOverrides {
                email_recipient: Some(String::from("nobody")),
                ..Default::default()
            },
        );
        assert!(matches!(
            loader.load_config_with_env(no_env),
            Err(ConfigBuildError::ValidationError(_))
        ));

        fs::remove_file(path).unwrap();
    }
}
