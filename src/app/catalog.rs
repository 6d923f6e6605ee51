use std::sync::Arc;

use catalog_core::core::bits::DispatchPolicy;
use derive_builder::Builder;
use eyre::Result;
use parking_lot::RwLock;

use super::{
    config::{CatalogSettings, ConfigBuildError},
    observers::CatalogObservers,
};
use crate::catalog::catalog::Catalog;

#[derive(Builder)]
#[builder(
    pattern = "owned",
    build_fn(name = "try_build", error = "ConfigBuildError")
)]
pub struct CatalogConfig {
    #[builder(setter(into, strip_option), default)]
    pub dispatch_policy: Option<DispatchPolicy>,
}

impl CatalogConfig {
    #[must_use]
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    pub fn from_settings(settings: &CatalogSettings) -> Result<Self, ConfigBuildError> {
        Self::builder()
            .dispatch_policy(settings.dispatch_policy)
            .try_build()
    }

    /// Create the catalog and attach observers in the order they are listed
    pub fn make(self, observers: &CatalogObservers) -> Result<Arc<RwLock<Catalog>>> {
        let catalog = Arc::new(RwLock::new(Catalog::new_with_policy(
            self.dispatch_policy.unwrap_or_default(),
        )));

        {
            let mut catalog = catalog.write();
            for observer in observers.enabled_handles() {
                catalog.attach(&observer);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::core::{bits::DispatchPolicy, test_util::get_mock_title_1};

    use crate::app::{
        config::{CatalogSettings, ObserverKind},
        observers::ObserversConfig,
    };

    use super::CatalogConfig;

    #[test]
    fn test_make_catalog_with_observers() {
        let observers = ObserversConfig::builder()
            .observers(vec![ObserverKind::Recommender, ObserverKind::EmailNotifier])
            .try_build()
            .unwrap()
            .make()
            .unwrap();

        let catalog = CatalogConfig::builder()
            .dispatch_policy(DispatchPolicy::FailFast)
            .try_build()
            .unwrap()
            .make(&observers)
            .unwrap();

        assert_eq!(catalog.read().observer_count(), 2);
        assert_eq!(catalog.read().get_policy(), DispatchPolicy::FailFast);

        catalog.write().add_item(get_mock_title_1()).unwrap();

        assert_eq!(observers.email_notifier.sent().len(), 1);
        assert_eq!(observers.recommender.notification_count(), 1);
        assert!(observers.logger_service.entries().is_empty());
    }

    #[test]
    fn test_catalog_config_from_settings() {
        let config = CatalogConfig::from_settings(&CatalogSettings::default()).unwrap();
        assert_eq!(config.dispatch_policy, Some(DispatchPolicy::Isolate));
    }

    #[test]
    fn test_default_policy() {
        let observers = ObserversConfig::builder().try_build().unwrap().make().unwrap();
        let catalog = CatalogConfig::builder()
            .try_build()
            .unwrap()
            .make(&observers)
            .unwrap();

        assert_eq!(catalog.read().get_policy(), DispatchPolicy::Isolate);
        assert_eq!(catalog.read().observer_count(), 3);
    }
}
