use std::sync::Arc;

use catalog_core::core::functional::ObserverHandle;
use derive_builder::Builder;
use eyre::Result;

use super::config::{ApplicationConfig, ConfigBuildError, ObserverKind};
use crate::catalog::{
    catalog::Catalog,
    observers::{
        email_notifier::EmailNotifier, logger_service::LoggerService, recommender::Recommender,
    },
};

#[derive(Builder)]
#[builder(
    pattern = "owned",
    build_fn(name = "try_build", error = "ConfigBuildError")
)]
pub struct ObserversConfig {
    #[builder(setter(into), default = "String::from(\"subscribers@catalog.example\")")]
    pub recipient: String,

    #[builder(default = "5")]
    pub max_recommendations: usize,

    #[builder(default = "ObserversConfig::all_observers()")]
    pub observers: Vec<ObserverKind>,
}

/// The observers owned by the application
///
/// The catalog only keeps weak handles, so this must outlive the
/// subscriptions.
pub struct CatalogObservers {
    pub email_notifier: Arc<EmailNotifier>,
    pub logger_service: Arc<LoggerService>,
    pub recommender: Arc<Recommender>,
    enabled: Vec<ObserverKind>,
}

impl CatalogObservers {
    /// Handle of the observer, same identity on every call
    pub fn handle(&self, kind: ObserverKind) -> ObserverHandle<Catalog> {
        match kind {
            ObserverKind::EmailNotifier => self.email_notifier.clone(),
            ObserverKind::LoggerService => self.logger_service.clone(),
            ObserverKind::Recommender => self.recommender.clone(),
        }
    }

    /// Handles of configured observers, in attachment order
    pub fn enabled_handles(&self) -> Vec<ObserverHandle<Catalog>> {
        self.enabled.iter().map(|kind| self.handle(*kind)).collect()
    }

    pub fn enabled(&self) -> &[ObserverKind] {
        &self.enabled
    }
}

impl ObserversConfig {
    #[must_use]
    pub fn builder() -> ObserversConfigBuilder {
        ObserversConfigBuilder::default()
    }

    fn all_observers() -> Vec<ObserverKind> {
        vec![
            ObserverKind::EmailNotifier,
            ObserverKind::LoggerService,
            ObserverKind::Recommender,
        ]
    }

    pub fn from_config(config: &ApplicationConfig) -> Result<Self, ConfigBuildError> {
        Self::builder()
            .recipient(config.email_notifier.recipient.clone())
            .max_recommendations(config.recommender.max_recommendations)
            .observers(config.catalog.observers.clone())
            .try_build()
    }

    pub fn make(self) -> Result<CatalogObservers> {
        tracing::debug!(
            recipient = %self.recipient,
            max_recommendations = self.max_recommendations,
            "Creating catalog observers"
        );

        Ok(CatalogObservers {
            email_notifier: Arc::new(EmailNotifier::new(self.recipient)),
            logger_service: Arc::new(LoggerService::new()),
            recommender: Arc::new(Recommender::new(self.max_recommendations)),
            enabled: self.observers,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app::config::{ApplicationConfig, ObserverKind};

    use super::ObserversConfig;

    #[test]
    fn test_handles_keep_identity() {
        let observers = ObserversConfig::builder().try_build().unwrap().make().unwrap();

        let first = observers.handle(ObserverKind::LoggerService);
        let second = observers.handle(ObserverKind::LoggerService);
        assert!(std::ptr::addr_eq(Arc::as_ptr(&first), Arc::as_ptr(&second)));
        assert_eq!(first.handler_name(), "LoggerService");
    }

    #[test]
    fn test_from_config() {
        let mut config = ApplicationConfig::default();
        config.email_notifier.recipient = String::from("ops@catalog.example");
        config.recommender.max_recommendations = 2;
        config.catalog.observers = vec![ObserverKind::Recommender];

        let observers = ObserversConfig::from_config(&config).unwrap().make().unwrap();

        assert_eq!(observers.email_notifier.recipient(), "ops@catalog.example");
        assert_eq!(observers.recommender.max_recommendations(), 2);
        assert_eq!(observers.enabled(), &[ObserverKind::Recommender]);

        let names: Vec<String> = observers
            .enabled_handles()
            .iter()
            .map(|handle| handle.handler_name().to_owned())
            .collect();
        assert_eq!(names, vec![String::from("Recommender")]);
    }
}
